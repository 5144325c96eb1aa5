//! JSON and YAML adapters for `attrmap`.
//!
//! Decoding parses text into plain data and runs the forward conversion with
//! the caller's [`MapFactory`](attrmap::MapFactory). Encoding runs the
//! inverse conversion, refuses circular structures and hands the plain data
//! to `serde_json` or `serde_yaml`.
//!
//! ```rust
//! use attrmap::Kind;
//! use attrmap_codec::{from_json, to_json, JsonOptions};
//!
//! let b = from_json(r#"{"x": {"y": [1, 2, 3]}}"#, &Kind::Plain)?;
//! assert_eq!(b.attr("x")?.attr("y")?.at(1)?, 2.into());
//! assert_eq!(to_json(&b, &JsonOptions::default())?, r#"{"x":{"y":[1,2,3]}}"#);
//! # Ok::<(), attrmap_codec::CodecError>(())
//! ```

mod error;
pub use error::*;

mod options;
pub use options::*;

mod encode;
mod tagged;

mod json;
pub use json::*;

mod yaml;
pub use yaml::*;

mod ext;
pub use ext::*;
