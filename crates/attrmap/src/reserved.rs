//! Names that attribute access routes to the container itself.
//!
//! A stored key with one of these names is still reachable through item
//! access; attribute access never sees it. Writing one of these names through
//! [`AttrMap::set_attr`](crate::AttrMap::set_attr) changes implementation state
//! rather than stored data, and logs a warning.

use crate::error::{AttrError, AttrResult};
use crate::string::is_identifier;
use crate::AttrStr;

/// Slot holding a default kind's fallback value.
pub const DEFAULT_SLOT: &str = "__default__";

/// Slot naming a default kind's factory.
pub const FACTORY_SLOT: &str = "default_factory";

/// Container methods and internal slots, sorted.
pub const RESERVED: &[&str] = &[
    DEFAULT_SLOT,
    "attr",
    "attr_names",
    "clear",
    "contains",
    "copy",
    "deep_copy",
    FACTORY_SLOT,
    "del_attr",
    "entries",
    "from_dict",
    "get",
    "get_or",
    "is_empty",
    "items",
    "keys",
    "kind",
    "len",
    "pop",
    "pop_or",
    "remove",
    "set",
    "set_attr",
    "setdefault",
    "to_dict",
    "to_json",
    "to_yaml",
    "update",
    "values",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.binary_search(&name).is_ok()
}

/// Validation mode for attribute names: fails on names attribute access
/// cannot store under.
pub fn check_attr_name(name: &str) -> AttrResult<()> {
    if !is_identifier(name) {
        return Err(AttrError::InvalidAttrName(AttrStr::from(name)));
    }
    if is_reserved(name) {
        return Err(AttrError::ReservedName(AttrStr::from(name)));
    }
    Ok(())
}
