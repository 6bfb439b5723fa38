use thiserror::Error;

/// Unified error type for version resolution
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in version-resolver
pub type Result<T> = std::result::Result<T, ResolverError>;

impl ResolverError {
    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        ResolverError::Parse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ResolverError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ResolverError::Manifest(msg.into())
    }
}
