//! Configuration loading and discovery for `cardgen.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::CardgenConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "cardgen.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse cardgen.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override the overwrite flag
    pub overwrite: Option<bool>,
    /// Enable strict mode checks
    pub strict: Option<bool>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Override pixels per layout unit
    pub unit_px: Option<u32>,
}

/// Find cardgen.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for cardgen.toml
/// 2. Check XDG_CONFIG_HOME/cardgen/cardgen.toml (or ~/.config/cardgen/cardgen.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find cardgen.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("cardgen").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find cardgen.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a cardgen.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// Relative paths in a loaded file are resolved against the directory that
/// contains it.
pub fn load_config(path: Option<&Path>) -> Result<CardgenConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => {
            log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<CardgenConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: CardgenConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = config_root(path) {
        resolve_paths(&mut config, root);
    }
    Ok(config)
}

/// Configuration used when no cardgen.toml is found.
pub fn default_config() -> CardgenConfig {
    CardgenConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut CardgenConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.output.dir = out.clone();
    }
    if let Some(overwrite) = overrides.overwrite {
        config.output.overwrite = overwrite;
    }
    if let Some(strict) = overrides.strict {
        config.render.strict = strict;
    }
    if let Some(jobs) = overrides.jobs {
        config.render.jobs = Some(jobs);
    }
    if let Some(unit_px) = overrides.unit_px {
        config.layout.unit_px = unit_px;
    }
}

/// Directory containing the config file.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn resolve_paths(config: &mut CardgenConfig, root: &Path) {
    for path in [&mut config.fonts.title, &mut config.fonts.body, &mut config.output.base_template]
        .into_iter()
        .flatten()
    {
        *path = resolve_path(root, path);
    }
    config.output.dir = resolve_path(root, &config.output.dir);
}
