//! # Barcode Commands
//!
//! Barcode generation from the barcode form.
//!
//! The label font is only needed for the human-readable line, so a request
//! without `show_text` never touches the asset files.

use etiquetas_core::BarcodeRequest;
use etiquetas_render::{encode_png, render_barcode, TextPainter};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AssetState;

/// A generated barcode ready for download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeImage {
    #[serde(skip)]
    pub png: Vec<u8>,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Generates a barcode PNG.
///
/// ## Errors
/// - `INVALID_INPUT` for empty data or module sizes out of range
/// - `ENCODING_ERROR` when the data is not valid for the symbology
/// - `ASSET_ERROR` when `show_text` is set and the font cannot be loaded
pub fn generate_barcode(assets: &AssetState, request: &BarcodeRequest) -> Result<BarcodeImage, ApiError> {
    debug!(
        symbology = %request.symbology,
        data = %request.data,
        show_text = request.show_text,
        "generate_barcode command"
    );

    let painter: Option<&dyn TextPainter> = if request.show_text {
        Some(assets.get()?.painter())
    } else {
        None
    };

    let image = render_barcode(request, painter)?;
    let png = encode_png(&image)?;

    Ok(BarcodeImage {
        png,
        file_name: request.file_name(),
        width: image.width(),
        height: image.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::stub_assets;
    use crate::error::ErrorCode;
    use crate::state::AssetState;
    use crate::AppConfig;
    use etiquetas_core::Symbology;

    fn request(symbology: Symbology, data: &str) -> BarcodeRequest {
        BarcodeRequest {
            symbology,
            data: data.to_string(),
            ..BarcodeRequest::default()
        }
    }

    /// Assets pointing nowhere: any attempt to load them fails.
    fn missing_assets() -> AssetState {
        let config = AppConfig {
            font_path: "/nonexistent/font.ttf".into(),
            watermark_path: "/nonexistent/logo.jpg".into(),
            ..AppConfig::default()
        };
        AssetState::new(&config)
    }

    #[test]
    fn test_default_request_without_text_needs_no_assets() {
        let image = generate_barcode(&missing_assets(), &BarcodeRequest::default()).unwrap();
        assert_eq!(image.file_name, "codigo_PRUEBASCAME.png");
        assert!(image.png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_show_text_requires_assets() {
        let mut req = BarcodeRequest::default();
        req.show_text = true;

        let err = generate_barcode(&missing_assets(), &req).unwrap_err();
        assert_eq!(err.code, ErrorCode::AssetError);

        let with_text = generate_barcode(&stub_assets(), &req).unwrap();
        let without_text = generate_barcode(&stub_assets(), &BarcodeRequest::default()).unwrap();
        assert!(with_text.height > without_text.height);
        assert_eq!(with_text.width, without_text.width);
    }

    #[test]
    fn test_encoding_errors() {
        let err = generate_barcode(&stub_assets(), &request(Symbology::Ean13, "ABC123")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EncodingError);

        let err = generate_barcode(&stub_assets(), &request(Symbology::Code39, "precio#1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EncodingError);
    }

    #[test]
    fn test_invalid_request_is_input_error() {
        let err = generate_barcode(&stub_assets(), &request(Symbology::Code128, "  ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let mut req = BarcodeRequest::default();
        req.module_width = 2.0;
        let err = generate_barcode(&stub_assets(), &req).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_wider_modules_give_wider_image() {
        let narrow = generate_barcode(&stub_assets(), &request(Symbology::Ean13, "779012345678")).unwrap();

        let mut req = request(Symbology::Ean13, "779012345678");
        req.module_width = 0.8;
        let wide = generate_barcode(&stub_assets(), &req).unwrap();

        assert!(wide.width > narrow.width);
        assert_eq!(wide.file_name, "codigo_779012345678.png");
    }
}
