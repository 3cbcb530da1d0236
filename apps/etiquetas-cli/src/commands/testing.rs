//! Fixtures shared by the command tests.

use etiquetas_render::{LabelAssets, TextExtent, TextPainter};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::state::AssetState;

/// Fixed-width glyph boxes: `size / 2` per character, `size` tall.
pub struct StubPainter;

impl TextPainter for StubPainter {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f32 * size / 2.0,
            height: if text.is_empty() { 0.0 } else { size },
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str) {
        let extent = self.measure(text, size);
        for py in y.max(0)..(y + extent.height as i32).min(canvas.height() as i32) {
            for px in x.max(0)..(x + extent.width as i32).min(canvas.width() as i32) {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Assets with the stub painter and a plain grey watermark.
pub fn stub_assets() -> AssetState {
    let watermark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([128, 128, 128, 255])));
    AssetState::preloaded(LabelAssets::new(Box::new(StubPainter), &watermark))
}
