use clap::Parser;
use colored::Colorize;
use healthcheck_core::cli::dispatch::{self, Presentation};
use healthcheck_core::cli::Cli;
use healthcheck_core::exit::HealthcheckExit;
use tracing::Level;

fn main() -> HealthcheckExit {
    let cli = Cli::parse();
    init_logging(&cli);
    let presentation = Presentation::from_cli(&cli);

    let result = if let Some(cmd) = cli.command {
        dispatch::execute(cmd, presentation)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(HealthcheckExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            HealthcheckExit::Error
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .try_init();
}
