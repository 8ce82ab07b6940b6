//! Font loading for the title and body roles

use std::fs;
use std::path::Path;

use rusttype::{point, Font, Scale};

use super::RasterError;
use crate::fit::TextMeasure;
use crate::layout::FontRole;

/// One loaded font per [`FontRole`].
pub struct FontSet {
    title: Font<'static>,
    body: Font<'static>,
}

impl FontSet {
    /// Load the title and body fonts from TrueType/OpenType files.
    pub fn load(title: &Path, body: &Path) -> Result<Self, RasterError> {
        Ok(Self { title: load_font(title)?, body: load_font(body)? })
    }

    /// Build a font set from already loaded fonts.
    pub fn from_fonts(title: Font<'static>, body: Font<'static>) -> Self {
        Self { title, body }
    }

    pub fn get(&self, role: FontRole) -> &Font<'static> {
        match role {
            FontRole::Title => &self.title,
            FontRole::Body => &self.body,
        }
    }
}

fn load_font(path: &Path) -> Result<Font<'static>, RasterError> {
    let bytes = fs::read(path).map_err(|source| RasterError::FontRead { path: path.to_path_buf(), source })?;
    Font::try_from_vec(bytes).ok_or_else(|| RasterError::FontParse(path.to_path_buf()))
}

impl TextMeasure for Font<'static> {
    fn advance(&self, text: &str, px: f32) -> f32 {
        self.layout(text, Scale::uniform(px), point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn line_height(&self, px: f32) -> f32 {
        let v = self.v_metrics(Scale::uniform(px));
        v.ascent - v.descent + v.line_gap
    }
}

/// DejaVu Sans from `tests/fixtures`, for both roles.
#[cfg(test)]
pub(crate) fn fixture_fonts() -> FontSet {
    static DEJAVU_SANS: &[u8] =
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf"));
    let font = Font::try_from_bytes(DEJAVU_SANS).expect("fixture font should parse");
    FontSet::from_fonts(font.clone(), font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_font() {
        let temp = TempDir::new().expect("should create temp dir");
        let missing = temp.path().join("missing.ttf");
        let result = FontSet::load(&missing, &missing);
        assert!(matches!(result, Err(RasterError::FontRead { .. })));
    }

    #[test]
    fn test_load_fixture_font_from_path() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");
        let fonts = FontSet::load(&path, &path).expect("fixture font should load");
        let font = fonts.get(FontRole::Body);
        assert!(font.advance("Pikachu", 20.0) > font.advance("Pika", 20.0));
        assert!(font.line_height(20.0) > 20.0);
    }

    #[test]
    fn test_load_invalid_font() {
        let temp = TempDir::new().expect("should create temp dir");
        let bogus = temp.path().join("bogus.ttf");
        fs::write(&bogus, b"definitely not a font").expect("should write file");
        let result = FontSet::load(&bogus, &bogus);
        assert!(matches!(result, Err(RasterError::FontParse(p)) if p == bogus));
    }
}
