use attrmap::AttrError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CodecError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Attr(#[from] AttrError),

    #[error("JSON error: {0}")]
    #[diagnostic(code(attrmap_codec::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(attrmap_codec::yaml))]
    Yaml(#[from] serde_yaml::Error),

    /// The structure contains itself; text formats cannot express that
    #[error("cannot encode a circular reference")]
    #[diagnostic(
        code(attrmap_codec::circular_reference),
        help("break the cycle before encoding")
    )]
    CircularReference,

    #[error("cannot encode {0}")]
    #[diagnostic(
        code(attrmap_codec::unrepresentable),
        help("default factories have no text form; convert to a value default first")
    )]
    Unrepresentable(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
