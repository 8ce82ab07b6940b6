//! PNG output and card file naming

use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Output path of the card at row `index`.
///
/// | Row | Name | File |
/// |-----|------|------|
/// | 0 | `Bulbasaur` | `0_bulbasaur.png` |
/// | 12 | `Mr. Mime` | `12_mr. mime.png` |
/// | 3 | `Type: Null` | `3_type_ null.png` |
///
/// Characters that cannot appear in a file name are replaced with `_`.
pub fn card_output_path(out_dir: &Path, index: usize, name: &str) -> PathBuf {
    let stem: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    out_dir.join(format!("{index}_{stem}.png"))
}
