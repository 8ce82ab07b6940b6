//! Text fill colour parsing
//!
//! Accepts `#RGB`, `#RRGGBB` and any CSS colour lightningcss understands
//! (`rgb()`, `hsl()`, named colours). Text is always drawn opaque, so alpha
//! components are parsed but dropped.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for colour parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid color length {0}, expected 3 or 6 hex digits")]
    InvalidLength(usize),
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// The dark ink the card fronts are printed with.
pub const DEFAULT_TEXT_COLOR: &str = "#252532";

/// Parse a colour string into an opaque RGBA value.
///
/// # Examples
///
/// ```
/// use cardgen::color::parse_color;
///
/// assert_eq!(parse_color("#252532").unwrap(), image::Rgba([37, 37, 50, 255]));
/// assert_eq!(parse_color("white").unwrap(), image::Rgba([255, 255, 255, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    parse_css(s)
}

fn parse_hex(hex: &str) -> Result<Rgba<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }
    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
    match digits.as_slice() {
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255])),
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

fn parse_css(s: &str) -> Result<Rgba<u8>, ColorError> {
    let color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    match color.to_rgb() {
        Ok(CssColor::RGBA(rgba)) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, 255])),
        _ => Err(ColorError::CssParse(format!("cannot convert '{s}' to RGB"))),
    }
}
