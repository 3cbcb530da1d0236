//! # Render Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / image::ImageError / barcoders::error::Error               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RenderError (this module) ← Adds path / symbology context             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (CLI) ← ASSET_ERROR / ENCODING_ERROR                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use etiquetas_core::CoreError;
use thiserror::Error;

/// Errors raised while producing label or barcode images.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A font or watermark file could not be read or decoded.
    ///
    /// ## When This Occurs
    /// - Configured path does not exist
    /// - Watermark is not a supported image format
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    /// Font bytes are not a usable TrueType/OpenType face.
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    /// Data violates the symbology's character set or length rules.
    #[error("Cannot encode '{data}' as {symbology}: {reason}")]
    Encoding {
        symbology: String,
        data: String,
        reason: String,
    },

    /// Request fields out of range (module size, empty data).
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    /// Image processing or PNG encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl RenderError {
    /// Creates an AssetLoad error for `path`.
    pub fn asset(path: &Path, reason: impl ToString) -> Self {
        RenderError::AssetLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an Encoding error.
    pub fn encoding(symbology: impl ToString, data: &str, reason: impl ToString) -> Self {
        RenderError::Encoding {
            symbology: symbology.to_string(),
            data: data.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results with RenderError.
pub type RenderResult<T> = Result<T, RenderError>;
