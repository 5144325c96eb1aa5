use lazy_static::lazy_static;
use regex::Regex;

pub use ecow::EcoString as AttrStr;

lazy_static! {
    static ref IDENT: Regex = Regex::new(r"^[\p{XID_Start}_][\p{XID_Continue}]*$").unwrap();
}

/// Whether `name` can be used with attribute access.
pub fn is_identifier(name: &str) -> bool {
    IDENT.is_match(name)
}
