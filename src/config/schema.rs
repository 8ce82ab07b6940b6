//! Configuration schema types for `cardgen.toml`
//!
//! Defines the structure and validation rules for card rendering configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{parse_color, DEFAULT_TEXT_COLOR};

/// Largest accepted pixels-per-unit; a card at this scale is 16384 × 23552 px.
pub const MAX_UNIT_PX: u32 = 1024;

/// Layout scale and text fitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pixels per layout unit; a card is 16 × 23 units
    #[serde(default = "default_unit_px")]
    pub unit_px: u32,
    /// Smallest text size as a fraction of the requested size
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { unit_px: default_unit_px(), min_scale: default_min_scale() }
    }
}

fn default_unit_px() -> u32 {
    64
}

fn default_min_scale() -> f32 {
    0.6
}

/// Font files for the title and body roles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<PathBuf>,
}

/// Text colours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// Fill colour for all card text
    #[serde(default = "default_text_color")]
    pub text: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { text: default_text_color() }
    }
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

/// Where and how card images are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for card fronts
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// Re-render cards whose output file already exists
    #[serde(default)]
    pub overwrite: bool,
    /// Image drawn under the text; a transparent card when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_template: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_out_dir(), overwrite: false, base_template: None }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("output/card_fronts")
}

/// Batch rendering settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Worker threads; all available cores when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
    /// Refuse cards with gaps or orphan names in their modes
    #[serde(default)]
    pub strict: bool,
}

/// Complete cardgen.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardgenConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub fonts: FontsConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "layout.min_scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cardgen.toml: '{}' {}", self.field, self.message)
    }
}

impl CardgenConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut error = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message })
        };

        if !(1..=MAX_UNIT_PX).contains(&self.layout.unit_px) {
            error(
                "layout.unit_px",
                format!("must be between 1 and {MAX_UNIT_PX}, got {}", self.layout.unit_px),
            );
        }

        if !(self.layout.min_scale > 0.0 && self.layout.min_scale <= 1.0) {
            error("layout.min_scale", format!("must be in (0, 1], got {}", self.layout.min_scale));
        }

        if let Err(e) = parse_color(&self.colors.text) {
            error("colors.text", format!("is not a valid colour: {e}"));
        }

        if self.render.jobs == Some(0) {
            error("render.jobs", "must be a positive integer".to_string());
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
