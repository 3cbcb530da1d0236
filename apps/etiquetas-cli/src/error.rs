//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Etiquetas                              │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── Invalid form?     CoreError        ──► INVALID_INPUT        │
//! │         ├── Bad barcode data? RenderError::Encoding ► ENCODING_ERROR    │
//! │         ├── Font missing?     RenderError::AssetLoad ► ASSET_ERROR      │
//! │         ├── Output unwritable? io / StoreError ──► STORAGE_ERROR        │
//! │         └── Bad config?       ConfigError      ──► CONFIG_ERROR         │
//! │                                                                         │
//! │  Province / price problems never reach here: the label commands turn   │
//! │  them into an inline warning instead.                                  │
//! │                                                                         │
//! │  Session output:  {"error": {"code": "ENCODING_ERROR", "message": ..}} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use etiquetas_core::{CoreError, ValidationError};
use etiquetas_render::RenderError;
use etiquetas_store::StoreError;
use serde::Serialize;

use crate::config::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_INPUT",
///   "message": "Validation error: scale must be between 0.1 and 3"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input failed validation
    InvalidInput,

    /// Barcode data not encodable in the chosen symbology
    EncodingError,

    /// Font or watermark missing or unreadable
    AssetError,

    /// Output or log file could not be written
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a storage error for a failed write to `path`.
    pub fn write_failed(path: &Path, err: std::io::Error) -> Self {
        tracing::error!(path = %path.display(), error = %err, "Write failed");
        ApiError::new(
            ErrorCode::StorageError,
            format!("Could not write {}: {}", path.display(), err),
        )
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::invalid_input(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

/// Converts render errors to API errors.
impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Encoding { .. } => ApiError::new(ErrorCode::EncodingError, err.to_string()),
            RenderError::AssetLoad { .. } | RenderError::InvalidFont(_) => {
                tracing::error!(error = %err, "Label assets unavailable");
                ApiError::new(ErrorCode::AssetError, err.to_string())
            }
            RenderError::InvalidInput(core) => ApiError::from(core),
            RenderError::Image(e) => {
                tracing::error!("Image processing failed: {}", e);
                ApiError::internal("Image processing failed")
            }
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Event log unavailable: {}", err);
        ApiError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
