//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod classify;
mod layout;
mod render;

use std::cmp::max;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use crate::config::MAX_UNIT_PX;
use crate::deck::load_deck;
use crate::stats::CardStats;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Cardgen - lay out and render card fronts from a deck table
#[derive(Parser)]
#[command(name = "cardgen")]
#[command(about = "Cardgen - lay out card text from a deck table (.csv, .tsv, .jsonl) and render PNG card fronts")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalOpts {
    /// Enable debug logging (at least `debug`, with timestamps)
    #[arg(global = true, long, default_value_t = false)]
    pub debug: bool,

    /// Minimum log level
    #[arg(global = true, long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Disable colored output in the logs
    #[arg(global = true, long, default_value_t = false)]
    pub no_colors: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one PNG card front per deck row
    Render {
        /// Deck table (.csv, .tsv, .jsonl)
        table: PathBuf,

        /// Output directory (default: output.dir from cardgen.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (default: nearest cardgen.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Re-render cards whose output already exists
        #[arg(long)]
        overwrite: bool,

        /// Refuse cards with gaps or orphan names in their modes
        #[arg(long)]
        strict: bool,

        /// Number of parallel jobs
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=256))]
        jobs: Option<u64>,

        /// Pixels per layout unit (card is 16 x 23 units)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_UNIT_PX as i64))]
        unit_px: Option<u32>,
    },

    /// Print each card's format and draw instructions
    Layout {
        /// Deck table (.csv, .tsv, .jsonl)
        table: PathBuf,

        /// Only show cards with this name (case-insensitive)
        #[arg(short, long)]
        card: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the format id of each card and any mode problems
    Classify {
        /// Deck table (.csv, .tsv, .jsonl)
        table: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Exit with an error if any card has mode problems
        #[arg(long)]
        strict: bool,
    },
}

/// Set up the terminal logger from the global options.
fn init_logging(opts: &GlobalOpts) {
    let level = if opts.debug { max(LevelFilter::Debug, opts.log_level) } else { opts.log_level };

    let mut builder = simplelog::ConfigBuilder::new();
    if opts.debug {
        builder.set_time_level(LevelFilter::Error);
        builder.set_time_format_rfc3339();
        builder.set_thread_level(LevelFilter::Error);
        builder.set_target_level(LevelFilter::Error);
    } else {
        builder.set_time_level(LevelFilter::Off);
        builder.set_thread_level(LevelFilter::Off);
        builder.set_target_level(LevelFilter::Off);
        builder.set_location_level(LevelFilter::Off);
    }

    let color = if opts.no_colors { ColorChoice::Never } else { ColorChoice::Auto };

    // Only fails if a logger is already installed
    let _ = TermLogger::init(level, builder.build(), TerminalMode::Stderr, color);
}

/// Load a deck, reporting failures the way every command does.
pub(crate) fn read_deck(table: &Path) -> Result<Vec<CardStats>, ExitCode> {
    load_deck(table).map_err(|e| {
        eprintln!("Error: {}: {}", table.display(), e);
        match e {
            crate::deck::DeckError::UnsupportedFormat(_) => ExitCode::from(EXIT_INVALID_ARGS),
            _ => ExitCode::from(EXIT_ERROR),
        }
    })
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Render { table, output, config, overwrite, strict, jobs, unit_px } => {
            render::run_render(&table, output, config.as_deref(), overwrite, strict, jobs, unit_px)
        }
        Commands::Layout { table, card, json } => layout::run_layout(&table, card.as_deref(), json),
        Commands::Classify { table, json, strict } => classify::run_classify(&table, json, strict),
    }
}
