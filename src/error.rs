//! Error types
//!
//! Only setup can fail: loading images and reading configuration. Everything
//! that happens inside a tick is infallible.

use thiserror::Error;

/// Image loading failures reported by the `ImageLoader` collaborator
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image not found: {path}")]
    NotFound { path: String },

    #[error("failed to decode image {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Settings/tuning file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
