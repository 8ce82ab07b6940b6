//! Loading deck tables
//!
//! A deck is a table with one card per row and the [`CardStats`] column names
//! as headers. CSV/TSV files and JSON Lines files are supported; the format is
//! picked from the file extension.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::stats::{CardStats, StatParseError};

/// Error type for deck loading
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("cannot read deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported deck format '{0}', expected .csv, .tsv, .jsonl or .ndjson")]
    UnsupportedFormat(String),
    #[error("CSV error in row {row}: {source}")]
    Csv { row: usize, source: csv::Error },
    #[error("JSON error on line {line}: {source}")]
    Json { line: usize, source: serde_json::Error },
    #[error("line {line}: column '{column}' must be a string, number, bool or null")]
    NestedValue { line: usize, column: String },
    #[error("row {row}: {source}")]
    Stat { row: usize, source: StatParseError },
    #[error("line {line}: {source}")]
    StatOnLine { line: usize, source: StatParseError },
}

/// Table formats a deck can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Csv,
    Tsv,
    JsonLines,
}

impl TableKind {
    pub fn from_path(path: &Path) -> Result<Self, DeckError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(TableKind::Csv),
            "tsv" => Ok(TableKind::Tsv),
            "jsonl" | "ndjson" => Ok(TableKind::JsonLines),
            _ => Err(DeckError::UnsupportedFormat(ext)),
        }
    }
}

/// Load every card of a deck file, in row order.
pub fn load_deck(path: &Path) -> Result<Vec<CardStats>, DeckError> {
    let kind = TableKind::from_path(path)?;
    let file = File::open(path)?;
    let deck = match kind {
        TableKind::Csv => read_delimited(file, b',')?,
        TableKind::Tsv => read_delimited(file, b'\t')?,
        TableKind::JsonLines => read_json_lines(BufReader::new(file))?,
    };
    log::debug!("loaded {} cards from {}", deck.len(), path.display());
    Ok(deck)
}

/// Read a delimited table with a header row.
///
/// Columns that are not card fields are ignored. Row numbers in errors are
/// 1-based and count data rows only.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Vec<CardStats>, DeckError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(|source| DeckError::Csv { row: 0, source })?.clone();
    for column in headers.iter() {
        if !CardStats::default().set_column(column, "").unwrap_or(true) {
            log::debug!("ignoring column '{column}'");
        }
    }

    let mut deck = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|source| DeckError::Csv { row, source })?;
        let mut stats = CardStats::default();
        for (column, cell) in headers.iter().zip(record.iter()) {
            stats.set_column(column, cell).map_err(|source| DeckError::Stat { row, source })?;
        }
        deck.push(stats);
    }
    Ok(deck)
}

/// Read a JSON Lines table: one flat object per line, blank lines skipped.
///
/// Numbers and bools are taken as their JSON text, `null` as absent.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<CardStats>, DeckError> {
    let mut deck = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let object: serde_json::Map<String, Value> =
            serde_json::from_str(trimmed).map_err(|source| DeckError::Json { line: line_no, source })?;
        let mut stats = CardStats::default();
        for (column, value) in &object {
            let raw = match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(DeckError::NestedValue { line: line_no, column: column.clone() })
                }
            };
            stats
                .set_column(column, &raw)
                .map_err(|source| DeckError::StatOnLine { line: line_no, source })?;
        }
        deck.push(stats);
    }
    Ok(deck)
}
