//! PNG byte encoding for downloads.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::error::RenderResult;

/// Encodes an RGB image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
