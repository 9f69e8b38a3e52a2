// File: crates/chart-overlay/src/error.rs
// Summary: Error taxonomy for the overlay engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("failed to load asset '{source_ref}': {reason}")]
    AssetLoad { source_ref: String, reason: String },

    #[error("failed to decode image '{0}'")]
    Decode(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("drawing surface unavailable ({0})")]
    SurfaceUnavailable(String),

    #[error("failed to encode export image: {0}")]
    Encode(String),

    #[error("invalid overlay configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OverlayError {
    pub fn asset_load(source_ref: impl Into<String>, reason: impl ToString) -> Self {
        OverlayError::AssetLoad { source_ref: source_ref.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;
