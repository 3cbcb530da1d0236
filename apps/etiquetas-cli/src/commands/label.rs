//! # Label Commands
//!
//! Preview and download of the price label.
//!
//! ## Label Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Label Flow                                           │
//! │                                                                         │
//! │  LabelForm ──► province selected? ──no──┐                              │
//! │                      │ yes              │                              │
//! │                      ▼                  ▼                              │
//! │                price parses? ──no──► Warning (inline, no image)        │
//! │                      │ yes                                             │
//! │                      ▼                                                  │
//! │     name / scale / quantity valid? ──no──► ApiError INVALID_INPUT      │
//! │                      │ yes                                             │
//! │                      ▼                                                  │
//! │        render_label ──► encode_png ──► LabelPreview                    │
//! │                                             │                           │
//! │                               download_label only:                     │
//! │                               write file ──► record province (CSV)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use etiquetas_core::validation::{validate_label_style, validate_product_name};
use etiquetas_core::{
    format_prices, CoreError, FormattedPrices, LabelStyle, PriceInput, Province, INVALID_FORM_WARNING,
    PROVINCE_PLACEHOLDER,
};
use etiquetas_render::{encode_png, render_label, LabelContent};
use etiquetas_store::AppendOutcome;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AssetState, LogState};

/// Download name of a label.
pub const LABEL_FILE_NAME: &str = "etiqueta.png";

// =============================================================================
// Request / Response Types
// =============================================================================

/// Current values of the label form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelForm {
    pub product_name: String,
    /// Selector value; `-` until a province is chosen.
    pub province: String,
    pub price: PriceInput,
    pub style: LabelStyle,
}

impl Default for LabelForm {
    fn default() -> Self {
        LabelForm {
            product_name: String::new(),
            province: PROVINCE_PLACEHOLDER.to_string(),
            price: PriceInput::default(),
            style: LabelStyle::default(),
        }
    }
}

/// A rendered label.
#[derive(Debug, Clone)]
pub struct LabelPreview {
    pub prices: FormattedPrices,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
    pub file_name: &'static str,
}

/// Result of a preview: an image, or the inline form warning.
#[derive(Debug, Clone)]
pub enum LabelOutcome {
    Warning(String),
    Ready(LabelPreview),
}

/// Result of a download.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// Nothing was written.
    Warning(String),
    /// The PNG is on disk; `logged` tells whether the province row made it.
    Saved {
        path: PathBuf,
        prices: FormattedPrices,
        width: u32,
        height: u32,
        logged: AppendOutcome,
    },
}

/// A form that passed every check.
struct ValidForm {
    product_name: String,
    province: Province,
    prices: FormattedPrices,
}

// =============================================================================
// Commands
// =============================================================================

/// Renders the label for the current form.
///
/// ## Returns
/// - `Warning` when no province is selected or the price does not parse
/// - `Ready` with the PNG bytes and display prices otherwise
pub fn preview_label(assets: &AssetState, form: &LabelForm) -> Result<LabelOutcome, ApiError> {
    debug!(province = %form.province, price = %form.price.raw_price, "preview_label command");

    match check_form(form)? {
        None => Ok(LabelOutcome::Warning(INVALID_FORM_WARNING.to_string())),
        Some(valid) => Ok(LabelOutcome::Ready(render_preview(assets, form, valid.product_name, valid.prices)?)),
    }
}

/// Renders the label, writes it to `path` and records the province.
///
/// The province row is best effort: a dropped write still leaves the file
/// saved and is reported through `logged`.
pub fn download_label(
    assets: &AssetState,
    logs: &LogState,
    form: &LabelForm,
    path: &Path,
) -> Result<DownloadOutcome, ApiError> {
    debug!(path = %path.display(), "download_label command");

    let Some(valid) = check_form(form)? else {
        return Ok(DownloadOutcome::Warning(INVALID_FORM_WARNING.to_string()));
    };

    let province = valid.province;
    let preview = render_preview(assets, form, valid.product_name, valid.prices)?;
    std::fs::write(path, &preview.png).map_err(|e| ApiError::write_failed(path, e))?;

    info!(
        path = %path.display(),
        province = %province,
        width = preview.width,
        height = preview.height,
        "Label saved"
    );

    let logged = logs.record_province(&province);
    Ok(DownloadOutcome::Saved {
        path: path.to_path_buf(),
        prices: preview.prices,
        width: preview.width,
        height: preview.height,
        logged,
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Runs every form check.
///
/// `Ok(None)` means the form only needs the inline warning; anything else
/// invalid is an error.
fn check_form(form: &LabelForm) -> Result<Option<ValidForm>, ApiError> {
    let province = match Province::parse(&form.province) {
        Ok(province) => province,
        Err(CoreError::ProvinceNotSelected) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let prices = match format_prices(&form.price) {
        Ok(prices) => prices,
        Err(CoreError::InvalidPrice { .. }) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let product_name = validate_product_name(&form.product_name)?;
    validate_label_style(&form.style)?;

    Ok(Some(ValidForm {
        product_name,
        province,
        prices,
    }))
}

fn render_preview(
    assets: &AssetState,
    form: &LabelForm,
    product_name: String,
    prices: FormattedPrices,
) -> Result<LabelPreview, ApiError> {
    let content = LabelContent {
        product_name: &product_name,
        prices: &prices,
        unit: form.price.unit,
    };
    let image = render_label(&content, &form.style, assets.get()?);
    let png = encode_png(&image)?;

    Ok(LabelPreview {
        width: image.width(),
        height: image.height(),
        prices,
        png,
        file_name: LABEL_FILE_NAME,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
