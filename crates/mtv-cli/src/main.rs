mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("MTV-QUBO CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Formulate(args) => {
            info!("Dispatching to 'formulate' command.");
            commands::formulate::run(args, &mut stdout)
        }
        Commands::Decode(args) => {
            info!("Dispatching to 'decode' command.");
            commands::decode::run(args, &mut stdout)
        }
        Commands::Rank(args) => {
            info!("Dispatching to 'rank' command.");
            commands::rank::run(args, &mut stdout)
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
