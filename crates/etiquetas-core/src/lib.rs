//! # etiquetas-core: Pure Logic for Price Labels
//!
//! This crate holds everything about a price label that can be computed
//! without touching a file, a font or a clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Etiquetas Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 etiquetas CLI / form session                    │   │
//! │  │    label, barcode, rate, session commands                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ etiquetas-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   wrap    │  │ validation│  │   │
//! │  │   │ TaxRate   │  │ normalize │  │ greedy    │  │  ranges   │  │   │
//! │  │   │ Unit, Rgb │  │ format    │  │ line fill │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FONTS • NO FILES • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌──────────────────────┐   ┌──▼───────────────────┐                   │
//! │  │  etiquetas-render    │   │  etiquetas-store     │                   │
//! │  │  PNG labels/barcodes │   │  CSV event log       │                   │
//! │  └──────────────────────┘   └──────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRate, Unit, Province, LabelStyle, ...)
//! - [`money`] - Price normalization, tax exclusion and display formatting
//! - [`wrap`] - Greedy word wrap against an injected measurement function
//! - [`validation`] - Range and format checks for form fields
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use etiquetas_core::money::format_prices;
//! use etiquetas_core::types::{PriceInput, TaxRate, Unit};
//!
//! let input = PriceInput::new("$150,00", TaxRate::General).with_unit(Unit::Liter, 1.0);
//! let prices = format_prices(&input).unwrap();
//!
//! assert_eq!(prices.final_price, "150,00");
//! assert_eq!(prices.price_excl_tax, "123,97");
//! assert_eq!(prices.price_per_unit.as_deref(), Some("150,00"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod wrap;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_amount, format_prices, normalize_price};
pub use types::*;
pub use wrap::wrap_text;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Label canvas width in pixels before scaling.
pub const LABEL_WIDTH: u32 = 720;

/// Label canvas height in pixels before scaling.
pub const LABEL_HEIGHT: u32 = 300;

/// Smallest accepted label scale factor.
pub const MIN_SCALE: f64 = 0.1;

/// Largest accepted label scale factor.
pub const MAX_SCALE: f64 = 3.0;

/// Placeholder shown in the province selector before a choice is made.
pub const PROVINCE_PLACEHOLDER: &str = "-";

/// Warning shown instead of a label when the form cannot be rendered.
pub const INVALID_FORM_WARNING: &str =
    "Por favor, seleccione su provincia y ingrese un número válido en el campo de Precio Final.";
