//! # Validation Module
//!
//! Range and format checks for the label and barcode forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Parsing (serde / clap)                                       │
//! │  ├── Selector values (TaxRate, Unit, Province, Rating)                 │
//! │  └── Colour strings (Rgb)                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Lengths (product name)                                            │
//! │  └── Numeric ranges (scale, quantity, barcode module size)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Encoders                                                      │
//! │  └── Symbology character sets (barcode library)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use etiquetas_core::validation::{validate_product_name, validate_scale};
//!
//! assert_eq!(validate_product_name("  Yerba  ").unwrap(), "Yerba");
//! assert!(validate_scale(3.5).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{BarcodeRequest, LabelStyle};
use crate::{MAX_SCALE, MIN_SCALE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted on a label.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest barcode payload accepted.
pub const MAX_BARCODE_DATA_LEN: usize = 80;

/// Smallest per-unit quantity the form accepts.
pub const MIN_QUANTITY: f64 = 0.1;

/// Barcode module width bounds, in millimetres.
pub const MODULE_WIDTH_RANGE: (f64, f64) = (0.1, 1.0);

/// Barcode module height bounds, in millimetres.
pub const MODULE_HEIGHT_RANGE: (f64, f64) = (10.0, 50.0);

// =============================================================================
// String Validators
// =============================================================================

/// Validates and trims a product name.
///
/// ## Rules
/// - May be empty (the label is drawn without a name block)
/// - At most 200 characters after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates the payload of a barcode.
pub fn validate_barcode_data(data: &str) -> ValidationResult<()> {
    let data = data.trim();
    if data.is_empty() {
        return Err(ValidationError::Required {
            field: "data".to_string(),
        });
    }
    if data.chars().count() > MAX_BARCODE_DATA_LEN {
        return Err(ValidationError::TooLong {
            field: "data".to_string(),
            max: MAX_BARCODE_DATA_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn in_range(field: &str, value: f64, (min, max): (f64, f64)) -> ValidationResult<()> {
    // NaN fails both comparisons, so check containment positively
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        })
    }
}

/// Validates the label scale factor (`0.1..=3.0`).
pub fn validate_scale(scale: f64) -> ValidationResult<()> {
    in_range("scale", scale, (MIN_SCALE, MAX_SCALE))
}

/// Validates a per-unit quantity: finite and at least 0.1.
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity < MIN_QUANTITY {
        return Err(ValidationError::TooSmall {
            field: "quantity".to_string(),
            min: MIN_QUANTITY,
        });
    }
    Ok(())
}

/// Validates the narrow bar width in millimetres.
pub fn validate_module_width(mm: f64) -> ValidationResult<()> {
    in_range("module width", mm, MODULE_WIDTH_RANGE)
}

/// Validates the bar height in millimetres.
pub fn validate_module_height(mm: f64) -> ValidationResult<()> {
    in_range("module height", mm, MODULE_HEIGHT_RANGE)
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a label style. Colours are already checked when parsed.
pub fn validate_label_style(style: &LabelStyle) -> ValidationResult<()> {
    validate_scale(style.scale)
}

/// Validates every field of a barcode request except the symbology's own
/// character set, which only the encoder knows.
pub fn validate_barcode_request(request: &BarcodeRequest) -> ValidationResult<()> {
    validate_barcode_data(&request.data)?;
    validate_module_width(request.module_width)?;
    validate_module_height(request.module_height)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
