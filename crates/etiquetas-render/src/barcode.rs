//! # Barcode Rendering
//!
//! Encodes barcode data with `barcoders` and rasterizes the modules at
//! 300 dpi.
//!
//! ## Geometry
//! ```text
//!   ◄─ 6.5 mm ─►◄────── modules × module_width ──────►◄─ 6.5 mm ─►
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                     1 mm top margin                           │
//!   │            █ ██ █  ███ █ ██  █ ███ █ █ ██                     │ ▲
//!   │            █ ██ █  ███ █ ██  █ ███ █ █ ██                     │ │ module_height
//!   │            █ ██ █  ███ █ ██  █ ███ █ █ ██                     │ ▼
//!   │                     ▲ 5 mm                                    │
//!   │                  7790123456787      ← 10 pt, show_text only   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Symbologies
//! | Scheme    | Input                          | Check             |
//! |-----------|--------------------------------|-------------------|
//! | `code128` | printable ASCII (set B)        | mod 103 (implied) |
//! | `ean13`   | 12 digits, or 13 with check    | verified if given |
//! | `code39`  | upper-cased A–Z 0–9 `-. $/+%`  | mod 43            |

use barcoders::sym::code128::Code128;
use barcoders::sym::code39::Code39;
use barcoders::sym::ean13::EAN13;
use etiquetas_core::types::{BarcodeRequest, Symbology};
use etiquetas_core::validation::validate_barcode_request;
use etiquetas_core::CoreError;
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::text::TextPainter;

// =============================================================================
// Constants
// =============================================================================

/// Output resolution.
pub const DPI: f64 = 300.0;

const MM_PER_INCH: f64 = 25.4;
const QUIET_ZONE_MM: f64 = 6.5;
const TOP_MARGIN_MM: f64 = 1.0;
const TEXT_DISTANCE_MM: f64 = 5.0;
const FONT_SIZE_PT: f64 = 10.0;

/// Code128 character-set B selector understood by `barcoders`.
const CODE128_SET_B: char = 'Ɓ';

/// Millimetres to whole pixels at 300 dpi.
pub fn mm_to_px(mm: f64) -> u32 {
    (mm * DPI / MM_PER_INCH).round().max(0.0) as u32
}

fn font_px() -> f32 {
    (FONT_SIZE_PT / 72.0 * DPI) as f32
}

// =============================================================================
// Encoding
// =============================================================================

/// Bar modules (`1` = bar, `0` = space) and the human-readable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSymbol {
    pub modules: Vec<u8>,
    pub text: String,
}

/// Encodes `data` for the given symbology.
pub fn encode_symbol(symbology: Symbology, data: &str) -> RenderResult<EncodedSymbol> {
    let fail = |reason: &dyn std::fmt::Display| RenderError::encoding(symbology, data, reason);

    match symbology {
        Symbology::Code128 => {
            if !data.chars().all(|c| (' '..='~').contains(&c)) {
                return Err(fail(&"only printable ASCII is supported"));
            }
            let symbol = Code128::new(format!("{}{}", CODE128_SET_B, data)).map_err(|e| fail(&e))?;
            Ok(EncodedSymbol {
                modules: symbol.encode(),
                text: data.to_string(),
            })
        }
        Symbology::Ean13 => {
            let payload = ean13_payload(data).map_err(|reason| fail(&reason))?;
            let symbol = EAN13::new(&payload).map_err(|e| fail(&e))?;
            Ok(EncodedSymbol {
                modules: symbol.encode(),
                text: format!("{}{}", payload, ean13_check_digit(&payload)),
            })
        }
        Symbology::Code39 => {
            let upper = data.to_uppercase();
            let symbol = Code39::with_checksum(&upper).map_err(|e| fail(&e))?;
            Ok(EncodedSymbol {
                modules: symbol.encode(),
                text: upper,
            })
        }
    }
}

/// The 12 payload digits of an EAN-13, verifying the check digit when 13
/// digits are given.
fn ean13_payload(data: &str) -> Result<String, String> {
    if !data.chars().all(|c| c.is_ascii_digit()) {
        return Err("only digits are allowed".to_string());
    }
    match data.len() {
        12 => Ok(data.to_string()),
        13 => {
            let (payload, check) = data.split_at(12);
            let expected = ean13_check_digit(payload);
            if check.chars().next() == char::from_digit(expected, 10) {
                Ok(payload.to_string())
            } else {
                Err(format!("check digit should be {}", expected))
            }
        }
        n => Err(format!("expected 12 or 13 digits, got {}", n)),
    }
}

/// EAN-13 check digit over 12 ASCII digits (weights 1,3,1,3,...).
pub fn ean13_check_digit(payload: &str) -> u32 {
    let sum: u32 = payload
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    (10 - sum % 10) % 10
}

// =============================================================================
// Rasterization
// =============================================================================

/// Validates, encodes and draws a barcode.
///
/// `painter` is only consulted when `show_text` is set; without one the text
/// is skipped.
pub fn render_barcode(request: &BarcodeRequest, painter: Option<&dyn TextPainter>) -> RenderResult<RgbImage> {
    validate_barcode_request(request).map_err(CoreError::from)?;

    let data = request.data.trim();
    let symbol = encode_symbol(request.symbology, data)?;

    let module_px = mm_to_px(request.module_width).max(1);
    let bar_height = mm_to_px(request.module_height).max(1);
    let quiet = mm_to_px(QUIET_ZONE_MM);
    let top = mm_to_px(TOP_MARGIN_MM);

    let text_painter = painter.filter(|_| request.show_text);
    let text_block = text_painter
        .map(|p| mm_to_px(TEXT_DISTANCE_MM) + p.measure(&symbol.text, font_px()).height.ceil() as u32)
        .unwrap_or(0);

    let width = 2 * quiet + symbol.modules.len() as u32 * module_px;
    let height = top + bar_height + text_block + top;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let black = Rgba([0, 0, 0, 255]);

    for (i, _) in symbol.modules.iter().enumerate().filter(|(_, m)| **m == 1) {
        let x0 = quiet + i as u32 * module_px;
        for x in x0..x0 + module_px {
            for y in top..top + bar_height {
                canvas.put_pixel(x, y, black);
            }
        }
    }

    if let Some(p) = text_painter {
        let extent = p.measure(&symbol.text, font_px());
        let x = ((width as f32 - extent.width) / 2.0).round() as i32;
        let y = (top + bar_height + mm_to_px(TEXT_DISTANCE_MM)) as i32;
        p.draw(&mut canvas, x, y, font_px(), black, &symbol.text);
    }

    debug!(
        symbology = %request.symbology,
        modules = symbol.modules.len(),
        width,
        height,
        "Barcode rendered"
    );

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::testing::BoxPainter;

    fn request(symbology: Symbology, data: &str) -> BarcodeRequest {
        BarcodeRequest {
            symbology,
            data: data.to_string(),
            ..BarcodeRequest::default()
        }
    }

    #[test]
    fn test_mm_to_px() {
        assert_eq!(mm_to_px(25.4), 300);
        assert_eq!(mm_to_px(6.5), 77);
        assert_eq!(mm_to_px(1.0), 12);
        assert_eq!(mm_to_px(0.4), 5);
    }

    #[test]
    fn test_ean13_check_digit() {
        assert_eq!(ean13_check_digit("779012345678"), 7);
        assert_eq!(ean13_check_digit("400638133393"), 1);
        assert_eq!(ean13_check_digit("590123412345"), 7);
    }

    #[test]
    fn test_ean13_accepts_12_and_valid_13_digits() {
        let twelve = encode_symbol(Symbology::Ean13, "590123412345").unwrap();
        let thirteen = encode_symbol(Symbology::Ean13, "5901234123457").unwrap();
        assert_eq!(twelve, thirteen);
        assert_eq!(twelve.text, "5901234123457");
        assert_eq!(twelve.modules.len(), 95);
    }

    #[test]
    fn test_ean13_rejects_bad_input() {
        for data in ["5901234123458", "59012341234", "59012341234A"] {
            assert!(
                matches!(encode_symbol(Symbology::Ean13, data), Err(RenderError::Encoding { .. })),
                "expected {data} to be rejected"
            );
        }
    }

    #[test]
    fn test_code128_ascii_only() {
        let symbol = encode_symbol(Symbology::Code128, "PRUEBASCAME").unwrap();
        assert!(!symbol.modules.is_empty());
        assert!(symbol.modules.iter().all(|m| *m <= 1));
        assert!(matches!(
            encode_symbol(Symbology::Code128, "AÑO"),
            Err(RenderError::Encoding { .. })
        ));
    }

    #[test]
    fn test_code39_uppercases() {
        let lower = encode_symbol(Symbology::Code39, "came-25").unwrap();
        let upper = encode_symbol(Symbology::Code39, "CAME-25").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.text, "CAME-25");
        assert!(encode_symbol(Symbology::Code39, "a@b").is_err());
    }

    #[test]
    fn test_render_dimensions() {
        let req = request(Symbology::Ean13, "779012345678");
        let img = render_barcode(&req, None).unwrap();

        // 95 modules × 5 px + 2 × 77 px quiet zone
        assert_eq!(img.width(), 95 * 5 + 2 * 77);
        // 12 + 236 + 12
        assert_eq!(img.height(), 12 + 236 + 12);

        // quiet zone is white, first module is a bar
        assert_eq!(img.get_pixel(0, 100).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(77, 100).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(77, 5).0, [255, 255, 255]);
    }

    #[test]
    fn test_render_with_text() {
        let painter = BoxPainter::default();
        let req = BarcodeRequest {
            show_text: true,
            ..request(Symbology::Ean13, "779012345678")
        };

        let img = render_barcode(&req, Some(&painter)).unwrap();

        let calls = painter.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "7790123456787");
        assert_eq!(calls[0].2, (12 + 236 + 59) as i32);
        assert!(img.height() > 12 + 236 + 12);
    }

    #[test]
    fn test_text_skipped_when_not_requested() {
        let painter = BoxPainter::default();
        render_barcode(&BarcodeRequest::default(), Some(&painter)).unwrap();
        assert!(painter.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_render_rejects_out_of_range_module() {
        let req = BarcodeRequest {
            module_width: 2.0,
            ..BarcodeRequest::default()
        };
        assert!(matches!(
            render_barcode(&req, None),
            Err(RenderError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_render_rejects_overlong_data() {
        let long = "X".repeat(10_000);
        assert!(matches!(
            render_barcode(&request(Symbology::Code128, &long), None),
            Err(RenderError::InvalidInput(_))
        ));

        let longest = "X".repeat(80);
        assert!(render_barcode(&request(Symbology::Code128, &longest), None).is_ok());
    }
}
