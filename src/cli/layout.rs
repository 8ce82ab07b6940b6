//! Layout command implementation

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use super::{read_deck, EXIT_ERROR, EXIT_SUCCESS};
use crate::layout::{layout_card, CardLayout};

#[derive(Serialize)]
struct CardEntry<'a> {
    index: usize,
    name: &'a str,
    #[serde(flatten)]
    layout: CardLayout,
}

/// Execute the layout command
pub fn run_layout(table: &Path, card: Option<&str>, json: bool) -> ExitCode {
    let deck = match read_deck(table) {
        Ok(deck) => deck,
        Err(code) => return code,
    };

    let entries: Vec<CardEntry> = deck
        .iter()
        .enumerate()
        .filter(|(_, stats)| card.map_or(true, |c| stats.display_name().eq_ignore_ascii_case(c)))
        .map(|(index, stats)| CardEntry { index, name: stats.display_name(), layout: layout_card(stats) })
        .collect();

    if let Some(name) = card {
        if entries.is_empty() {
            eprintln!("Error: no card named '{}' in {}", name, table.display());
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    for entry in &entries {
        println!("{} {} (format {})", entry.index, entry.name, entry.layout.format);
        for draw in &entry.layout.instructions {
            println!(
                "  {:<15} {:?} {:>4} at ({}, {}) box {}x{} {:?} {}  {:?}",
                draw.field.column(),
                draw.role,
                draw.size,
                draw.position.x,
                draw.position.y,
                draw.wrap.width,
                draw.wrap.height,
                draw.align,
                draw.anchor.code(),
                draw.text,
            );
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
