//! Render command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{read_deck, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::batch::Batch;
use crate::color::parse_color;
use crate::config::{load_config, merge_cli_overrides, CardgenConfig, CliOverrides};
use crate::fit::FitPolicy;
use crate::raster::{load_base_template, FontSet, TextStyle};

/// Execute the render command
pub fn run_render(
    table: &Path,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
    overwrite: bool,
    strict: bool,
    jobs: Option<u64>,
    unit_px: Option<u32>,
) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Flags only switch behaviour on; absent flags keep the config value
    let overrides = CliOverrides {
        out: output,
        overwrite: overwrite.then_some(true),
        strict: strict.then_some(true),
        jobs: jobs.map(|j| j as usize),
        unit_px,
    };
    merge_cli_overrides(&mut config, &overrides);

    let (Some(title), Some(body)) = (&config.fonts.title, &config.fonts.body) else {
        eprintln!("Error: rendering needs fonts; set [fonts] title and body in cardgen.toml");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    let fonts = match FontSet::load(title, body) {
        Ok(fonts) => fonts,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let style = match text_style(&config) {
        Ok(style) => style,
        Err(code) => return code,
    };

    let deck = match read_deck(table) {
        Ok(deck) => deck,
        Err(code) => return code,
    };

    let mut batch = Batch::new(&fonts, style, config.output.dir.clone())
        .with_overwrite(config.output.overwrite)
        .with_strict(config.render.strict);
    if let Some(jobs) = config.render.jobs {
        batch = batch.with_jobs(jobs);
    }
    if let Some(path) = &config.output.base_template {
        match load_base_template(path, style.unit_px) {
            Ok(base) => batch = batch.with_base(base),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    let report = match batch.run(&deck) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for failed in report.failures() {
        eprintln!("  {} {}: {}", failed.index, failed.name, failed.status);
    }
    println!("{} -> {}: {}", table.display(), config.output.dir.display(), report.summary());

    if report.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

fn text_style(config: &CardgenConfig) -> Result<TextStyle, ExitCode> {
    let fill = parse_color(&config.colors.text).map_err(|e| {
        eprintln!("Error: invalid text colour '{}': {}", config.colors.text, e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    Ok(TextStyle {
        fill,
        unit_px: config.layout.unit_px,
        policy: FitPolicy { min_scale: config.layout.min_scale },
    })
}
