//! Error types for registry configuration and remodeling.

use thiserror::Error;

/// Boxed error returned by compute functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from building or applying a [`TransformRegistry`](crate::TransformRegistry).
#[derive(Debug, Error)]
pub enum RemodelError {
    /// A flat key/transformation sequence was malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A compute function failed. The function's error is kept as `source`.
    #[error("transformation for '{output_key}' failed: {source}")]
    Transformation {
        output_key: String,
        #[source]
        source: BoxError,
    },
    /// A declarative configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RemodelError>;
