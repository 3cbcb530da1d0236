//! # Error Types
//!
//! Domain-specific error types for etiquetas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  etiquetas-core errors (this file)                                     │
//! │  ├── CoreError        - Invalid form input (price, province, options)  │
//! │  └── ValidationError  - Field-level range / format failures            │
//! │                                                                         │
//! │  etiquetas-render: RenderError  (assets, encoding)                     │
//! │  etiquetas-store:  StoreError   (file writes)                          │
//! │                                                                         │
//! │  CLI: ApiError  - What the user sees (code + message)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → inline warning         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning form input into label data.
///
/// Every variant is an *invalid input*: the caller shows a warning and skips
/// rendering entirely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The raw price could not be normalized into a non-negative number.
    ///
    /// ## When This Occurs
    /// - Empty field, or only the currency symbol (`"$"`)
    /// - Letters or stray symbols (`"12a"`)
    /// - Negative or non-finite values
    #[error("Invalid price '{raw}': {reason}")]
    InvalidPrice { raw: String, reason: String },

    /// The province selector is still on its placeholder.
    #[error("Province must be selected")]
    ProvinceNotSelected,

    /// A selector received a value outside its option list.
    #[error("Unknown {field}: '{value}'")]
    UnknownOption { field: String, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidPrice error.
    pub fn invalid_price(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidPrice {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Creates an UnknownOption error.
    pub fn unknown(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::UnknownOption {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed colour).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is positive but below the accepted minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
