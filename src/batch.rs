//! Rendering a whole deck to card images.
//!
//! Cards are independent, so they are rendered on a rayon thread pool. A card
//! that fails is recorded in the report and does not stop the others.
//!
//! ```ignore
//! use cardgen::batch::Batch;
//!
//! let report = Batch::new(&fonts, style, out_dir)
//!     .with_jobs(4)
//!     .with_overwrite(true)
//!     .run(&deck)?;
//!
//! println!("{} rendered, {} failed", report.rendered_count(), report.failed_count());
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::RgbaImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::format::{mode_issues, CardFormat, ModeIssue};
use crate::layout::{layout_card, CardLayout};
use crate::output::{card_output_path, save_png, OutputError};
use crate::raster::{blank_canvas, draw_layout, FontSet, TextStyle};
use crate::stats::{CardStats, Field};

/// Errors that stop a whole batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot create output directory '{}': {source}", path.display())]
    OutputDir { path: PathBuf, source: std::io::Error },
    #[error("cannot start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors that fail a single card
#[derive(Debug, Error)]
pub enum CardError {
    #[error("refused in strict mode: {}", join_issues(.0))]
    Strict(Vec<ModeIssue>),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn join_issues(issues: &[ModeIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Status of a single card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardStatus {
    /// Image written
    Rendered {
        format: CardFormat,
        /// Fields whose text was cut to fit its box
        truncated: Vec<Field>,
    },
    /// Output already existed and overwrite is off
    Skipped,
    Failed(String),
}

impl CardStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, CardStatus::Failed(_))
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardStatus::Rendered { format, .. } => write!(f, "rendered (format {format})"),
            CardStatus::Skipped => write!(f, "skipped"),
            CardStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of rendering one card.
#[derive(Debug, Clone)]
pub struct CardResult {
    /// Row index in the deck
    pub index: usize,
    pub name: String,
    pub path: PathBuf,
    pub status: CardStatus,
    pub duration: Duration,
}

/// Result of a complete batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One result per card, in deck order
    pub cards: Vec<CardResult>,
    pub total_duration: Duration,
}

impl BatchReport {
    pub fn rendered_count(&self) -> usize {
        self.cards.iter().filter(|c| matches!(c.status, CardStatus::Rendered { .. })).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.cards.iter().filter(|c| matches!(c.status, CardStatus::Skipped)).count()
    }

    pub fn failed_count(&self) -> usize {
        self.cards.iter().filter(|c| c.status.is_failure()).count()
    }

    /// Check if every card was rendered or skipped.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Iterate over failed cards.
    pub fn failures(&self) -> impl Iterator<Item = &CardResult> {
        self.cards.iter().filter(|c| c.status.is_failure())
    }

    /// One-line summary of the run.
    pub fn summary(&self) -> String {
        format!(
            "{} rendered, {} skipped, {} failed in {:.2}s",
            self.rendered_count(),
            self.skipped_count(),
            self.failed_count(),
            self.total_duration.as_secs_f64()
        )
    }
}

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Lay out a card, refusing it in strict mode if its modes are malformed.
pub fn check_card(stats: &CardStats, strict: bool) -> Result<CardLayout, CardError> {
    let issues = mode_issues(stats);
    if !issues.is_empty() {
        if strict {
            return Err(CardError::Strict(issues));
        }
        log::warn!("{}: {}", stats.display_name(), join_issues(&issues));
    }
    Ok(layout_card(stats))
}

/// Whether an existing output file means the card is left alone.
pub fn should_skip(path: &Path, overwrite: bool) -> bool {
    !overwrite && path.is_file()
}

/// Render one card onto a copy of `base`, or a blank card when there is none.
///
/// Returns the image and the fields that had to be truncated.
pub fn render_card(
    layout: &CardLayout,
    fonts: &FontSet,
    style: &TextStyle,
    base: Option<&RgbaImage>,
) -> (RgbaImage, Vec<Field>) {
    let mut canvas = match base {
        Some(image) => image.clone(),
        None => blank_canvas(style.unit_px),
    };
    let truncated = draw_layout(&mut canvas, layout, fonts, style);
    (canvas, truncated)
}

/// Batch renderer for a deck.
pub struct Batch<'a> {
    fonts: &'a FontSet,
    style: TextStyle,
    out_dir: PathBuf,
    base: Option<RgbaImage>,
    jobs: usize,
    overwrite: bool,
    strict: bool,
}

impl<'a> Batch<'a> {
    pub fn new(fonts: &'a FontSet, style: TextStyle, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts,
            style,
            out_dir: out_dir.into(),
            base: None,
            jobs: default_jobs(),
            overwrite: false,
            strict: false,
        }
    }

    /// Set the number of parallel jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Draw text over this image instead of a transparent card.
    pub fn with_base(mut self, base: RgbaImage) -> Self {
        self.base = Some(base);
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Render every card of the deck.
    pub fn run(&self, deck: &[CardStats]) -> Result<BatchReport, BatchError> {
        let start = Instant::now();
        std::fs::create_dir_all(&self.out_dir)
            .map_err(|source| BatchError::OutputDir { path: self.out_dir.clone(), source })?;

        log::info!("rendering {} cards with {} workers", deck.len(), self.jobs);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build()?;
        let cards: Vec<CardResult> = pool.install(|| {
            deck.par_iter().enumerate().map(|(index, stats)| self.run_card(index, stats)).collect()
        });

        let report = BatchReport { cards, total_duration: start.elapsed() };
        for failed in report.failures() {
            log::warn!("card {} ({}): {}", failed.index, failed.name, failed.status);
        }
        log::info!("{}", report.summary());
        Ok(report)
    }

    fn run_card(&self, index: usize, stats: &CardStats) -> CardResult {
        let start = Instant::now();
        let name = stats.display_name().to_string();
        let path = card_output_path(&self.out_dir, index, &name);

        let status = if should_skip(&path, self.overwrite) {
            log::debug!("skipping {}, already exists", path.display());
            CardStatus::Skipped
        } else {
            match self.render_and_save(stats, &path) {
                Ok((format, truncated)) => CardStatus::Rendered { format, truncated },
                Err(e) => CardStatus::Failed(e.to_string()),
            }
        };

        CardResult { index, name, path, status, duration: start.elapsed() }
    }

    fn render_and_save(&self, stats: &CardStats, path: &Path) -> Result<(CardFormat, Vec<Field>), CardError> {
        let layout = check_card(stats, self.strict)?;
        log::debug!("{}: format {}", stats.display_name(), layout.format);

        let (image, truncated) = render_card(&layout, self.fonts, &self.style, self.base.as_ref());
        for field in &truncated {
            log::debug!("{}: {} truncated to fit", stats.display_name(), field);
        }
        save_png(&image, path)?;
        Ok((layout.format, truncated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::FitPolicy;
    use crate::raster::{card_dimensions, fixture_fonts};
    use crate::stats::ModeSlot;
    use image::Rgba;
    use tempfile::TempDir;

    fn small_style() -> TextStyle {
        TextStyle { fill: Rgba([37, 37, 50, 255]), unit_px: 8, policy: FitPolicy::default() }
    }

    fn card(name: &str) -> CardStats {
        CardStats { pokedex_name: Some(name.to_string()), ..Default::default() }
    }

    fn result(status: CardStatus) -> CardResult {
        CardResult {
            index: 0,
            name: "card".to_string(),
            path: PathBuf::from("0_card.png"),
            status,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_check_card_lays_out_valid_card() {
        let mut stats = card("Pikachu");
        stats.ability = Some("Zap".to_string());
        let layout = check_card(&stats, true).expect("valid card");
        assert_eq!(layout.format, CardFormat::Description);
    }

    #[test]
    fn test_check_card_strict_refuses_gap() {
        let mut stats = card("Ditto");
        stats.mode_2_ability = Some("Copy".to_string());
        match check_card(&stats, true) {
            Err(CardError::Strict(issues)) => {
                assert_eq!(issues, vec![ModeIssue::Gap { missing: ModeSlot::One }])
            }
            other => panic!("expected strict refusal, got {other:?}"),
        }
    }

    #[test]
    fn test_check_card_lenient_keeps_gap() {
        let mut stats = card("Ditto");
        stats.mode_2_ability = Some("Copy".to_string());
        assert!(check_card(&stats, false).is_ok());
    }

    #[test]
    fn test_strict_error_message_lists_issues() {
        let err = CardError::Strict(vec![ModeIssue::OrphanName { mode: ModeSlot::Three }]);
        assert!(err.to_string().contains("mode 3"), "{err}");
    }

    #[test]
    fn test_should_skip_existing_unless_overwrite() {
        let temp = tempfile::TempDir::new().expect("should create temp dir");
        let path = temp.path().join("0_a.png");
        assert!(!should_skip(&path, false));

        std::fs::write(&path, b"png").expect("should write file");
        assert!(should_skip(&path, false));
        assert!(!should_skip(&path, true));
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            cards: vec![
                result(CardStatus::Rendered { format: CardFormat::Named, truncated: vec![] }),
                result(CardStatus::Skipped),
                result(CardStatus::Skipped),
                result(CardStatus::Failed("disk full".to_string())),
            ],
            total_duration: Duration::from_millis(1500),
        };
        assert_eq!(report.rendered_count(), 1);
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.summary(), "1 rendered, 2 skipped, 1 failed in 1.50s");
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(BatchReport::default().is_success());
    }

    #[test]
    fn test_status_display() {
        let status = CardStatus::Rendered { format: CardFormat::ThreeModes, truncated: vec![] };
        assert!(status.to_string().starts_with("rendered"));
        assert_eq!(CardStatus::Failed("boom".to_string()).to_string(), "failed: boom");
    }

    #[test]
    fn test_run_keeps_going_after_a_failed_card() {
        let temp = TempDir::new().expect("should create temp dir");
        // A directory squatting on card 1's image path makes its save fail
        std::fs::create_dir_all(temp.path().join("1_pikachu.png")).expect("should create dir");

        let fonts = fixture_fonts();
        let batch = Batch::new(&fonts, small_style(), temp.path()).with_jobs(2);
        assert_eq!(batch.jobs(), 2);

        let deck = vec![card("Bulbasaur"), card("Pikachu"), card("Mew")];
        let report = batch.run(&deck).expect("batch should run");

        assert_eq!(report.cards.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(report.rendered_count(), 2);
        assert_eq!(report.failures().map(|c| c.index).collect::<Vec<_>>(), vec![1]);
        assert!(!report.is_success());

        let image = image::open(temp.path().join("2_mew.png")).expect("card 2 rendered").to_rgba8();
        assert_eq!(image.dimensions(), card_dimensions(8));
        assert!(image.pixels().any(|p| p.0[3] > 0), "card name drawn");
        assert!(temp.path().join("0_bulbasaur.png").is_file());
    }

    #[test]
    fn test_run_skips_existing_output_unless_overwrite() {
        let temp = TempDir::new().expect("should create temp dir");
        let existing = temp.path().join("0_bulbasaur.png");
        std::fs::write(&existing, b"old").expect("should write file");

        let fonts = fixture_fonts();
        let deck = vec![card("Bulbasaur"), card("Mew")];

        let report = Batch::new(&fonts, small_style(), temp.path())
            .with_jobs(1)
            .run(&deck)
            .expect("batch should run");
        assert_eq!(report.cards[0].status, CardStatus::Skipped);
        assert_eq!(report.rendered_count(), 1);
        assert_eq!(std::fs::read(&existing).expect("should read file"), b"old");

        let report = Batch::new(&fonts, small_style(), temp.path())
            .with_overwrite(true)
            .run(&deck)
            .expect("batch should run");
        assert_eq!(report.rendered_count(), 2);
        assert!(image::open(&existing).is_ok());
    }

    #[test]
    fn test_run_strict_fails_only_malformed_card() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut ditto = card("Ditto");
        ditto.mode_2_ability = Some("Copy".to_string());

        let fonts = fixture_fonts();
        let report = Batch::new(&fonts, small_style(), temp.path())
            .with_strict(true)
            .run(&[card("Mew"), ditto])
            .expect("batch should run");

        assert!(matches!(report.cards[0].status, CardStatus::Rendered { .. }));
        match &report.cards[1].status {
            CardStatus::Failed(message) => assert!(message.contains("strict"), "{message}"),
            other => panic!("expected strict failure, got {other:?}"),
        }
        assert!(!temp.path().join("1_ditto.png").exists());
    }
}
