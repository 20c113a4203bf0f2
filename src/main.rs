//! ANIPM backend probe
//!
//! Runs the backend's HTTP endpoint checks and exits non-zero when any of
//! them fails.

use anipm_probe::{cli, commands, common};
use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "anipm-probe", about = "Integration test runner for the ANIPM backend API")]
#[command(version, long_about = None)]
struct Cli {
    /// Verbose output (debug logs, response previews)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    common::logging::init_cli(cli.verbose);

    match cli::dispatch(cli.command, cli.verbose).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
