//! Stamping laid-out text onto a card canvas
//!
//! Consumes [`DrawInstruction`]s: fits each text into its wrap box, places the
//! wrapped block by its anchor and alpha-blends the glyphs in a single fill
//! colour. Glyph pixels that fall outside the canvas are clipped.

mod font;

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use rusttype::{point, Scale};
use thiserror::Error;

pub use font::FontSet;

#[cfg(test)]
pub(crate) use font::fixture_fonts;

use crate::fit::{fit_text, FitPolicy, FittedText, TextMeasure};
use crate::layout::{
    Align, CardLayout, DrawInstruction, HAnchor, VAnchor, CARD_HEIGHT_UNITS, CARD_WIDTH_UNITS,
    REFERENCE_UNIT_PX,
};
use crate::stats::Field;

/// Error type for canvas and font setup
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot read font '{}': {source}", path.display())]
    FontRead { path: PathBuf, source: std::io::Error },
    #[error("'{}' is not a TrueType/OpenType font", .0.display())]
    FontParse(PathBuf),
    #[error("cannot load base template '{}': {source}", path.display())]
    Template { path: PathBuf, source: image::ImageError },
}

/// How text is drawn onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub fill: Rgba<u8>,
    /// Pixels per layout unit
    pub unit_px: u32,
    pub policy: FitPolicy,
}

impl TextStyle {
    /// Convert layout units to pixels.
    pub fn px(&self, units: f32) -> f32 {
        units * self.unit_px as f32
    }

    /// Convert a reference point size to pixels at this unit size.
    pub fn font_px(&self, size: f32) -> f32 {
        size * self.unit_px as f32 / REFERENCE_UNIT_PX as f32
    }
}

/// Pixel dimensions of a card at `unit_px`.
pub fn card_dimensions(unit_px: u32) -> (u32, u32) {
    (
        (CARD_WIDTH_UNITS * unit_px as f32).round() as u32,
        (CARD_HEIGHT_UNITS * unit_px as f32).round() as u32,
    )
}

/// A transparent card-sized canvas.
pub fn blank_canvas(unit_px: u32) -> RgbaImage {
    let (w, h) = card_dimensions(unit_px);
    RgbaImage::new(w, h)
}

/// Load the base template image, resized to the card dimensions.
pub fn load_base_template(path: &Path, unit_px: u32) -> Result<RgbaImage, RasterError> {
    let (w, h) = card_dimensions(unit_px);
    let image = image::open(path)
        .map_err(|source| RasterError::Template { path: path.to_path_buf(), source })?
        .to_rgba8();
    if image.dimensions() == (w, h) {
        return Ok(image);
    }
    Ok(image::imageops::resize(&image, w, h, FilterType::Lanczos3))
}

/// Vertical metrics of a fitted block, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_height: f32,
    pub lines: usize,
    /// Width of the widest line
    pub width: f32,
}

impl BlockMetrics {
    /// From the first line's ascender to the last line's descender.
    pub fn height(&self) -> f32 {
        if self.lines == 0 {
            return 0.0;
        }
        (self.lines - 1) as f32 * self.line_height + self.ascent - self.descent
    }
}

/// Top-left corner of a block whose anchor point sits at `(x, y)`.
pub fn block_origin(horizontal: HAnchor, vertical: VAnchor, x: f32, y: f32, block: &BlockMetrics) -> (f32, f32) {
    let left = match horizontal {
        HAnchor::Left => x,
        HAnchor::Middle => x - block.width / 2.0,
        HAnchor::Right => x - block.width,
    };
    let top = match vertical {
        VAnchor::Ascender => y,
        VAnchor::Middle => y - block.height() / 2.0,
        VAnchor::Baseline => y - (block.lines.saturating_sub(1) as f32 * block.line_height + block.ascent),
    };
    (left, top)
}

/// Horizontal start of a line of `width` inside a block.
pub fn line_start(align: Align, left: f32, block_width: f32, width: f32) -> f32 {
    match align {
        Align::Left => left,
        Align::Center => left + (block_width - width) / 2.0,
        Align::Right => left + block_width - width,
    }
}

/// Blend `color` at `coverage` over the destination pixel.
pub fn blend_over(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let sa = (coverage.clamp(0.0, 1.0) * color.0[3] as f32) / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let blended = (color.0[c] as f32 * sa + dst.0[c] as f32 * da * (1.0 - sa)) / out_a;
        dst.0[c] = blended.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Fit and draw one instruction; returns how the text was fitted.
pub fn stamp(canvas: &mut RgbaImage, instruction: &DrawInstruction, fonts: &FontSet, style: &TextStyle) -> FittedText {
    let font = fonts.get(instruction.role);
    let fitted = fit_text(
        font,
        &instruction.text,
        style.font_px(instruction.size),
        style.px(instruction.wrap.width),
        style.px(instruction.wrap.height),
        style.policy,
    );

    let scale = Scale::uniform(fitted.px);
    let v = font.v_metrics(scale);
    let widths: Vec<f32> = fitted.lines.iter().map(|line| font.advance(line, fitted.px)).collect();
    let block = BlockMetrics {
        ascent: v.ascent,
        descent: v.descent,
        line_height: font.line_height(fitted.px),
        lines: fitted.lines.len(),
        width: widths.iter().copied().fold(0.0, f32::max),
    };
    let (left, top) = block_origin(
        instruction.anchor.horizontal,
        instruction.anchor.vertical,
        style.px(instruction.position.x),
        style.px(instruction.position.y),
        &block,
    );

    for (i, (line, width)) in fitted.lines.iter().zip(&widths).enumerate() {
        let x = line_start(instruction.align, left, block.width, *width);
        let baseline = top + block.ascent + i as f32 * block.line_height;
        for glyph in font.layout(line, scale, point(x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= canvas.width() || py as u32 >= canvas.height() {
                    return;
                }
                blend_over(canvas.get_pixel_mut(px as u32, py as u32), style.fill, coverage);
            });
        }
    }

    fitted
}

/// Draw every instruction of a card in order.
///
/// Returns the fields whose text had to be truncated to fit.
pub fn draw_layout(canvas: &mut RgbaImage, layout: &CardLayout, fonts: &FontSet, style: &TextStyle) -> Vec<Field> {
    layout
        .instructions
        .iter()
        .filter_map(|instruction| {
            let fitted = stamp(canvas, instruction, fonts, style);
            fitted.truncated.then_some(instruction.field)
        })
        .collect()
}
