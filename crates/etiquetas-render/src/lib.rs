//! # etiquetas-render: Raster Output for Etiquetas
//!
//! Draws price labels and barcodes and encodes them as PNG.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Etiquetas Render Flow                            │
//! │                                                                         │
//! │  preview_label / generate_barcode (CLI commands)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                etiquetas-render (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    assets     │    │     label     │    │   barcode    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ FontFace      │───►│ 720×300 RGBA  │    │ barcoders    │  │   │
//! │  │   │ watermark     │    │ text, borders │    │ 300 dpi bars │  │   │
//! │  │   └───────────────┘    │ watermark     │    └──────┬───────┘  │   │
//! │  │                        └───────┬───────┘           │          │   │
//! │  │                                └─────────┬─────────┘          │   │
//! │  │                                          ▼                    │   │
//! │  │                                   png::encode_png             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`text`] - `TextPainter` seam and the TrueType implementation
//! - [`assets`] - Font + watermark loaded once per process
//! - [`label`] - Price label composition
//! - [`barcode`] - Symbol encoding and rasterization
//! - [`png`] - PNG byte encoding
//! - [`error`] - Render error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assets;
pub mod barcode;
pub mod error;
pub mod label;
pub mod png;
pub mod text;

// =============================================================================
// Re-exports
// =============================================================================

pub use assets::LabelAssets;
pub use barcode::{encode_symbol, render_barcode, EncodedSymbol};
pub use error::{RenderError, RenderResult};
pub use label::{render_label, LabelContent};
pub use png::encode_png;
pub use text::{FontFace, TextExtent, TextPainter};
