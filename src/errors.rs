use thiserror::Error;

// Every failure the accessor can surface. Payloads name the offending key or notation.
#[derive(Debug, Error)]
pub enum DotError {
    // A required key is absent. Wildcard removes carry every failed notation, comma-joined.
    #[error("path '{0}' was not found")]
    PathNotFound(String),

    // Descent hit a leaf where a collection was needed.
    #[error("path key '{0}' is not a collection")]
    PathNotTraversable(String),

    #[error("target '{0}' is not a collection")]
    TargetNotCollection(String),

    #[error("merge source is not a collection")]
    SourceNotCollection,

    #[error("'{0}' is not a supported get mode; use one of: default, found, exception")]
    InvalidMode(String),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

// Type alias for results that use `DotError` as the error type
pub type Result<T> = std::result::Result<T, DotError>;
