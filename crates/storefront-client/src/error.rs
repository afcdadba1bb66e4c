use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by every data source.
///
/// All request-time variants render with a `request failed` prefix: callers
/// surface the message as-is and never branch on the cause. Nothing is
/// retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx response.
    #[error("request failed: HTTP {status}: {reason}")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("request failed: invalid JSON from {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A local data source has no entry for the requested id or slug.
    #[error("request failed: {0} not found")]
    NotFound(String),

    #[error("request failed: could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
