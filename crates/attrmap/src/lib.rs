//! Mappings whose entries are reachable both by key and as attributes, a
//! small family of container kinds that customise missing-key reads and
//! assignment, and a conversion engine between plain nested data
//! ([`Dict`], [`List`], [`Tuple`]) and attribute form.
//!
//! ```rust
//! use attrmap::{dict, list, to_attr_form_as, Kind, Value};
//!
//! let plain: Value = dict! { "x" => dict! { "y" => list![1, 2, 3] } }.into();
//! let b = to_attr_form_as(&plain, &Kind::Plain);
//! assert_eq!(b.attr("x")?.attr("y")?.at(1)?, 2.into());
//! # Ok::<(), attrmap::AttrError>(())
//! ```

#[macro_use]
mod macros;

mod string;
pub use string::*;

mod shared;
pub use shared::*;

mod error;
pub use error::*;

mod key;
pub use key::*;

mod list;
pub use list::*;

mod dict;
pub use dict::*;

mod kind;
pub use kind::*;

pub mod reserved;
pub use reserved::{check_attr_name, is_reserved};

mod value;
pub use value::*;

mod map;
pub use map::*;

mod convert;
pub use convert::*;

mod repr;
mod serial;
