//! Command dispatch logic extracted from binary to keep `main` small.

use super::args::{Cli, Commands};
use super::handlers::{handle_check, handle_report, handle_scan};
use crate::exit::HealthcheckExit;
use anyhow::Result;
use std::io::IsTerminal;

/// Global presentation switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub color: bool,
}

impl Presentation {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            color: !cli.no_color && std::io::stdout().is_terminal(),
        }
    }
}

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, presentation: Presentation) -> Result<HealthcheckExit> {
    match command {
        Commands::Check(args) => handle_check(&args, presentation),
        Commands::Scan(args) => handle_scan(&args),
        Commands::Report(args) => handle_report(&args, presentation),
    }
}
