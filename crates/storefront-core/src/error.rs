use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised by the pure domain layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("product {product_id} has more than one variant for size {size} / color {color}")]
    DuplicateVariant {
        product_id: String,
        size: String,
        color: String,
    },
}
