//! Cardgen - Library for laying out and rendering card fronts
//!
//! This library provides functionality to:
//! - Load card stats from CSV/TSV and JSON Lines deck tables
//! - Resolve each card to one of eleven text layouts from which fields it has
//! - Turn a card into positioned draw instructions
//! - Fit and stamp the text onto a card image and write PNGs in parallel

pub mod batch;
pub mod cli;
pub mod color;
pub mod config;
pub mod deck;
pub mod fit;
pub mod format;
pub mod layout;
pub mod output;
pub mod raster;
pub mod stats;
