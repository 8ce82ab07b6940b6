//! Classify command implementation

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use super::{read_deck, EXIT_ERROR, EXIT_SUCCESS};
use crate::format::{classify, mode_issues, CardFormat, ModeIssue};

#[derive(Serialize)]
struct Classification<'a> {
    index: usize,
    name: &'a str,
    format: CardFormat,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<ModeIssue>,
}

/// Execute the classify command
pub fn run_classify(table: &Path, json: bool, strict: bool) -> ExitCode {
    let deck = match read_deck(table) {
        Ok(deck) => deck,
        Err(code) => return code,
    };

    let rows: Vec<Classification> = deck
        .iter()
        .enumerate()
        .map(|(index, stats)| Classification {
            index,
            name: stats.display_name(),
            format: classify(stats),
            issues: mode_issues(stats),
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&rows) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for row in &rows {
            println!("{}\t{}\t{}", row.index, row.format, row.name);
            for issue in &row.issues {
                println!("\t  warning: {}", issue);
            }
        }
    }

    let with_issues = rows.iter().filter(|r| !r.issues.is_empty()).count();
    if with_issues > 0 {
        log::warn!("{} of {} cards have mode problems", with_issues, rows.len());
        if strict {
            return ExitCode::from(EXIT_ERROR);
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
