//! Error types for container access and conversion
//!
//! All fallible operations return [`AttrResult<T>`]. Errors propagate to the
//! immediate caller; a conversion that fails part way leaves no usable result.

use crate::{AttrStr, Key};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, PartialEq, Clone)]
pub enum AttrError {
    /// Item lookup or removal of an absent key
    #[error("key not found: {0}")]
    #[diagnostic(code(attrmap::key_not_found))]
    KeyNotFound(Key),

    /// Attribute lookup or deletion of an absent key
    #[error("attribute not found: {0}")]
    #[diagnostic(code(attrmap::attribute_not_found))]
    AttributeNotFound(AttrStr),

    #[error("not a valid attribute name: {0:?}")]
    #[diagnostic(
        code(attrmap::invalid_attr_name),
        help("use item access (`get`/`set`) for keys that are not identifiers")
    )]
    InvalidAttrName(AttrStr),

    /// The name belongs to the container's own API or state
    #[error("reserved attribute name: {0}")]
    #[diagnostic(
        code(attrmap::reserved_name),
        help("reserved names are only reachable as stored keys through `get`/`set`")
    )]
    ReservedName(AttrStr),

    #[error("type mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(attrmap::type_mismatch))]
    TypeMismatch { expected: String, found: String },

    /// A caller-supplied container factory failed
    #[error("container factory failed: {0}")]
    #[diagnostic(code(attrmap::factory))]
    Factory(String),

    #[error("index {index} out of range for sequence of length {len}")]
    #[diagnostic(code(attrmap::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },
}

impl AttrError {
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        AttrError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Missing-key failures from either access style.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AttrError::KeyNotFound(_) | AttrError::AttributeNotFound(_)
        )
    }
}

pub type AttrResult<T> = Result<T, AttrError>;
