//! # Label Composition
//!
//! Draws the 720×300 price label required for shop displays.
//!
//! ## Layout
//! ```text
//!  (0,0)                                                            (719,0)
//!  ┌──────────────────────────────────────────────────────────────────────┐
//!  │┌────────────────────────────────────────────────────────────────────┐│
//!  ││ (30,33)                  (320,33) Precio final al consumidor       ││
//!  ││ PRODUCT NAME             (320,56) $ 1.234,50          ← 45 px      ││
//!  ││ WRAPPED AT 235 px                                                  ││
//!  ││                          (320,117) Precio sin impuestos ... $      ││
//!  ││                          (320,138) Precio ... por kilogramo $      ││
//!  ││                                                                    ││
//!  │├──────────────────────────── y = 190 ───────────────────────────────┤│
//!  ││                        bottom_background                           ││
//!  │└────────────────────────────────────────────────────────────────────┘│
//!  └──────────────────────────────────────────────────────────────────────┘
//!   outer border 10 px (0..719 × 0..299), inner border 2 px (10..709 × 10..289)
//! ```
//!
//! Drawing order: backgrounds, text, borders, then the watermark over
//! everything, then the uniform rescale.

use etiquetas_core::types::{FormattedPrices, LabelStyle, Rgb, Unit};
use etiquetas_core::{wrap_text, LABEL_HEIGHT, LABEL_WIDTH};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

use crate::assets::LabelAssets;
use crate::text::TextPainter;

// =============================================================================
// Layout Constants
// =============================================================================

/// First row of the bottom band.
pub const BOTTOM_BAND_Y: u32 = 190;

const NAME_X: i32 = 30;
const NAME_Y: i32 = 33;
const NAME_SIZE: f32 = 24.0;
const NAME_WRAP_WIDTH: f32 = 235.0;
const NAME_LINE_GAP: i32 = 9;

const PRICE_X: i32 = 320;
const CAPTION_SIZE: f32 = 16.0;
const FINAL_PRICE_SIZE: f32 = 45.0;

const FINAL_CAPTION_Y: i32 = 33;
const FINAL_PRICE_Y: i32 = 56;
const EXCL_TAX_Y: i32 = 117;
const PER_UNIT_Y: i32 = 138;

const OUTER_BORDER_WIDTH: u32 = 10;
const INNER_BORDER_WIDTH: u32 = 2;

/// Watermark offset: bottom-right anchored with a 10 px margin.
const WATERMARK_ORIGIN: (i64, i64) = (-10, 20);

/// Caption for the final price.
pub const FINAL_PRICE_CAPTION: &str = "Precio final al consumidor";

/// Caption prefix for the tax-excluded price.
pub const EXCL_TAX_CAPTION: &str = "Precio sin impuestos nacionales (IVA) $";

// =============================================================================
// Content
// =============================================================================

/// What goes on a label.
#[derive(Debug, Clone, Copy)]
pub struct LabelContent<'a> {
    pub product_name: &'a str,
    pub prices: &'a FormattedPrices,
    pub unit: Unit,
}

/// Renders a label with the shared assets.
pub fn render_label(content: &LabelContent<'_>, style: &LabelStyle, assets: &LabelAssets) -> RgbImage {
    compose_label(content, style, assets.painter(), assets.watermark())
}

/// Renders a label with an explicit painter and prepared watermark.
pub fn compose_label(
    content: &LabelContent<'_>,
    style: &LabelStyle,
    painter: &dyn TextPainter,
    watermark: &RgbaImage,
) -> RgbImage {
    let mut canvas = RgbaImage::from_pixel(LABEL_WIDTH, LABEL_HEIGHT, rgba(style.top_background));
    fill_rect(
        &mut canvas,
        (0, BOTTOM_BAND_Y),
        (LABEL_WIDTH - 1, LABEL_HEIGHT - 1),
        rgba(style.bottom_background),
    );

    let text_color = rgba(style.text_color);
    draw_product_name(&mut canvas, painter, content.product_name, text_color);
    draw_prices(&mut canvas, painter, content, text_color);

    draw_outline(
        &mut canvas,
        (0, 0),
        (LABEL_WIDTH - 1, LABEL_HEIGHT - 1),
        OUTER_BORDER_WIDTH,
        rgba(style.outer_border),
    );
    draw_outline(
        &mut canvas,
        (OUTER_BORDER_WIDTH, OUTER_BORDER_WIDTH),
        (LABEL_WIDTH - 1 - OUTER_BORDER_WIDTH, LABEL_HEIGHT - 1 - OUTER_BORDER_WIDTH),
        INNER_BORDER_WIDTH,
        rgba(style.inner_border),
    );

    imageops::overlay(&mut canvas, watermark, WATERMARK_ORIGIN.0, WATERMARK_ORIGIN.1);

    let flat = DynamicImage::ImageRgba8(canvas).to_rgb8();
    rescale(flat, style.scale)
}

/// Output dimensions for a scale factor, never below 1×1.
pub fn scaled_size(scale: f64) -> (u32, u32) {
    let dim = |base: u32| ((base as f64 * scale).floor() as u32).max(1);
    (dim(LABEL_WIDTH), dim(LABEL_HEIGHT))
}

fn rescale(image: RgbImage, scale: f64) -> RgbImage {
    if scale == 1.0 {
        return image;
    }
    let (width, height) = scaled_size(scale);
    imageops::resize(&image, width, height, FilterType::CatmullRom)
}

// =============================================================================
// Drawing Steps
// =============================================================================

fn draw_product_name(canvas: &mut RgbaImage, painter: &dyn TextPainter, name: &str, color: Rgba<u8>) {
    let upper = name.to_uppercase();
    let lines = wrap_text(&upper, NAME_WRAP_WIDTH, |line| painter.measure(line, NAME_SIZE).width);

    for (i, line) in lines.iter().enumerate() {
        let line_height = painter.measure(line, NAME_SIZE).height as i32;
        let y = NAME_Y + i as i32 * (line_height + NAME_LINE_GAP);
        painter.draw(canvas, NAME_X, y, NAME_SIZE, color, line);
    }
}

fn draw_prices(canvas: &mut RgbaImage, painter: &dyn TextPainter, content: &LabelContent<'_>, color: Rgba<u8>) {
    let prices = content.prices;

    painter.draw(canvas, PRICE_X, FINAL_CAPTION_Y, CAPTION_SIZE, color, FINAL_PRICE_CAPTION);
    painter.draw(
        canvas,
        PRICE_X,
        FINAL_PRICE_Y,
        FINAL_PRICE_SIZE,
        color,
        &format!("${}", prices.final_price),
    );
    painter.draw(
        canvas,
        PRICE_X,
        EXCL_TAX_Y,
        CAPTION_SIZE,
        color,
        &format!("{}{}", EXCL_TAX_CAPTION, prices.price_excl_tax),
    );

    if let (Some(caption), Some(per_unit)) = (content.unit.per_unit_caption(), &prices.price_per_unit) {
        painter.draw(
            canvas,
            PRICE_X,
            PER_UNIT_Y,
            CAPTION_SIZE,
            color,
            &format!("{} ${}", caption, per_unit),
        );
    }
}

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// Fills the inclusive rectangle `[min, max]`.
fn fill_rect(canvas: &mut RgbaImage, min: (u32, u32), max: (u32, u32), color: Rgba<u8>) {
    for y in min.1..=max.1.min(canvas.height() - 1) {
        for x in min.0..=max.0.min(canvas.width() - 1) {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Strokes the inclusive rectangle `[min, max]` with a band `width` px
/// thick growing inward.
fn draw_outline(canvas: &mut RgbaImage, min: (u32, u32), max: (u32, u32), width: u32, color: Rgba<u8>) {
    for y in min.1..=max.1 {
        for x in min.0..=max.0 {
            let in_band = x < min.0 + width
                || x + width > max.0
                || y < min.1 + width
                || y + width > max.1;
            if in_band {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
