//! Footpath CLI - walking navigation from the command line.
//!
//! Thin shell over the `footpath` library: compute a walking route, or
//! drive a live guidance session from fix events on stdin.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "footpath",
    version,
    about = "Walking navigation: routes and live guidance toward a destination"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a walking route between two coordinates.
    Route(commands::RouteArgs),

    /// Drive a live guidance session from fix events on stdin.
    Guide(commands::GuideArgs),
}

fn main() {
    // Logs go to stderr so stdout stays a clean guidance stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Route(args) => commands::route::run(args),
        Command::Guide(args) => commands::guide::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
