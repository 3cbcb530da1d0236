//! # Text Painting
//!
//! The label and barcode renderers never touch a font directly; they go
//! through [`TextPainter`], so composition can be tested with a stub that
//! draws solid boxes.
//!
//! ```text
//!   (x, y) ─► ┌──────────────────────┐  ▲
//!             │ PRECIO FINAL          │  │ ascent
//!   baseline ─┼───────────────────────┤  ▼
//!             └──────────────────────┘
//! ```
//!
//! Coordinates are the top-left corner of the line box (the ascender line),
//! matching how the label layout is specified.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::error::{RenderError, RenderResult};

/// Measured size of a run of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Measures and draws single lines of text.
pub trait TextPainter {
    /// Size of `text` rendered at `size` pixels.
    fn measure(&self, text: &str, size: f32) -> TextExtent;

    /// Draws `text` with its line box's top-left corner at `(x, y)`.
    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str);
}

// =============================================================================
// TrueType Face
// =============================================================================

/// A TrueType/OpenType face rasterized with `rusttype`.
pub struct FontFace {
    font: Font<'static>,
}

impl FontFace {
    /// Parses font bytes.
    pub fn from_bytes(data: Vec<u8>) -> RenderResult<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| RenderError::InvalidFont("not a TrueType/OpenType font".into()))?;
        Ok(FontFace { font })
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl TextPainter for FontFace {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        let scale = Scale::uniform(size);
        let ascent = self.font.v_metrics(scale).ascent;

        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for glyph in self.font.layout(text, scale, point(0.0, ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                bounds = Some(match bounds {
                    None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                    Some((x0, y0, x1, y1)) => (
                        x0.min(bb.min.x),
                        y0.min(bb.min.y),
                        x1.max(bb.max.x),
                        y1.max(bb.max.y),
                    ),
                });
            }
        }

        match bounds {
            // width runs from the pen origin so leading bearings count
            Some((_, y0, x1, y1)) => TextExtent {
                width: x1.max(0) as f32,
                height: (y1 - y0) as f32,
            },
            None => TextExtent::default(),
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str) {
        let scale = Scale::uniform(size);
        let ascent = self.font.v_metrics(scale).ascent;
        let origin = point(x as f32, y as f32 + ascent);

        let (width, height) = (canvas.width() as i32, canvas.height() as i32);

        for glyph in self.font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height || coverage <= 0.0 {
                    return;
                }
                blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
            });
        }
    }
}

/// Source-over blend of `color` at `coverage` onto an opaque pixel.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let a = coverage.min(1.0) * (color.0[3] as f32 / 255.0);
    let inv = 1.0 - a;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Every character is `size / 2` wide and the line is `size` tall.
    /// Drawing fills the measured box with the colour.
    #[derive(Default)]
    pub struct BoxPainter {
        pub calls: Mutex<Vec<(String, i32, i32, f32)>>,
    }

    impl TextPainter for BoxPainter {
        fn measure(&self, text: &str, size: f32) -> TextExtent {
            if text.is_empty() {
                return TextExtent::default();
            }
            TextExtent {
                width: text.chars().count() as f32 * size / 2.0,
                height: size,
            }
        }

        fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str) {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), x, y, size));

            let extent = self.measure(text, size);
            for py in y.max(0)..(y + extent.height as i32).min(canvas.height() as i32) {
                for px in x.max(0)..(x + extent.width as i32).min(canvas.width() as i32) {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_font_bytes() {
        let err = FontFace::from_bytes(b"definitely not a font".to_vec()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont(_)));
    }

    #[test]
    fn test_blend_full_and_partial_coverage() {
        let mut px = Rgba([255, 255, 255, 255]);
        blend(&mut px, Rgba([0, 0, 0, 255]), 1.0);
        assert_eq!(px, Rgba([0, 0, 0, 255]));

        let mut px = Rgba([255, 255, 255, 255]);
        blend(&mut px, Rgba([0, 0, 0, 255]), 0.5);
        assert_eq!(px.0[0], 128);
        assert_eq!(px.0[3], 255);
    }
}
