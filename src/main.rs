//! Cardgen - Command-line tool for rendering card fronts from deck tables

use std::process::ExitCode;

use cardgen::cli;

fn main() -> ExitCode {
    cli::run()
}
