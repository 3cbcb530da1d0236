//! # Label Assets
//!
//! The font face and the watermark image, loaded once and shared by every
//! render in the process.
//!
//! The watermark is prepared at load time (resized to 720×270 and made
//! almost transparent) so each render only composites it.

use std::path::Path;

use etiquetas_core::LABEL_WIDTH;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::info;

use crate::error::{RenderError, RenderResult};
use crate::text::{FontFace, TextPainter};

/// Watermark height after resizing.
pub const WATERMARK_HEIGHT: u32 = 270;

/// Alpha applied to every watermark pixel.
pub const WATERMARK_ALPHA: u8 = 9;

/// Font and watermark for label rendering.
pub struct LabelAssets {
    painter: Box<dyn TextPainter + Send + Sync>,
    watermark: RgbaImage,
}

impl LabelAssets {
    /// Loads the font and watermark from disk.
    ///
    /// Either file missing or undecodable is an `AssetLoad` error; the
    /// handles are closed before this returns.
    pub fn load(font_path: &Path, watermark_path: &Path) -> RenderResult<Self> {
        let font_bytes = std::fs::read(font_path).map_err(|e| RenderError::asset(font_path, e))?;
        let face = FontFace::from_bytes(font_bytes).map_err(|e| RenderError::asset(font_path, e))?;

        let watermark = image::open(watermark_path).map_err(|e| RenderError::asset(watermark_path, e))?;

        info!(
            font = %font_path.display(),
            watermark = %watermark_path.display(),
            "Label assets loaded"
        );

        Ok(Self::new(Box::new(face), &watermark))
    }

    /// Builds assets from an already-loaded painter and watermark image.
    pub fn new(painter: Box<dyn TextPainter + Send + Sync>, watermark: &DynamicImage) -> Self {
        LabelAssets {
            painter,
            watermark: prepare_watermark(watermark),
        }
    }

    /// Text painter backed by the label font.
    pub fn painter(&self) -> &dyn TextPainter {
        self.painter.as_ref()
    }

    /// The prepared (resized, faded) watermark.
    pub fn watermark(&self) -> &RgbaImage {
        &self.watermark
    }
}

impl std::fmt::Debug for LabelAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelAssets")
            .field("watermark", &self.watermark.dimensions())
            .finish_non_exhaustive()
    }
}

/// Resizes the watermark to 720×270 and sets every pixel's alpha to 9.
pub fn prepare_watermark(source: &DynamicImage) -> RgbaImage {
    let mut resized = imageops::resize(
        &source.to_rgba8(),
        LABEL_WIDTH,
        WATERMARK_HEIGHT,
        FilterType::CatmullRom,
    );
    for pixel in resized.pixels_mut() {
        pixel.0[3] = WATERMARK_ALPHA;
    }
    resized
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_prepare_watermark_size_and_alpha() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([200, 0, 0])));
        let prepared = prepare_watermark(&source);

        assert_eq!(prepared.dimensions(), (720, 270));
        assert!(prepared.pixels().all(|p| p.0[3] == WATERMARK_ALPHA));
        assert_eq!(prepared.get_pixel(360, 135).0[0], 200);
    }

    #[test]
    fn test_load_missing_font() {
        let dir = tempfile::tempdir().unwrap();
        let err = LabelAssets::load(&dir.path().join("nope.ttf"), &dir.path().join("wm.jpg"))
            .unwrap_err();
        assert!(matches!(err, RenderError::AssetLoad { .. }));
    }

    #[test]
    fn test_load_invalid_font() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("broken.ttf");
        std::fs::write(&font, b"not a font").unwrap();

        let err = LabelAssets::load(&font, &dir.path().join("wm.jpg")).unwrap_err();
        match err {
            RenderError::AssetLoad { path, .. } => assert!(path.ends_with("broken.ttf")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
