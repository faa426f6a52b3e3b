// errors.rs
use astra::Response;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while handling a single request. Every variant is turned into
/// a JSON error body at the serve boundary; none of them stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Route not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Client input was missing, zero, malformed, or named an unknown category.
    #[error("{0}")]
    BadRequest(String),

    /// Aggregation or prediction failed on data that passed validation.
    #[error("{0}")]
    Computation(String),

    #[error("Internal server error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

/// Failures reading or writing the dataset file and the model bundle.
/// Fatal at startup, there is no fallback state to serve from.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("malformed artifact {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArtifactError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ArtifactError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
