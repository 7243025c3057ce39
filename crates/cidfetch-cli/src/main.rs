//! # cidfetch CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cidfetch_cli::fetch::{run_fetch, FetchArgs};
use cidfetch_cli::reclaim::{run_reclaim, ReclaimArgs};
use cidfetch_cli::verify::{run_verify, VerifyArgs};

/// Fetch content-addressed payloads into a local cache directory.
#[derive(Parser, Debug)]
#[command(name = "cidfetch", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a CID into the cache directory and print its path.
    Fetch(FetchArgs),

    /// Re-hash a cached entry against the hash embedded in its name.
    Verify(VerifyArgs),

    /// Remove orphaned temporary files from the cache directory.
    Reclaim(ReclaimArgs),
}

/// Filter for a `-v` count. `RUST_LOG` takes precedence when set.
fn env_filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cidfetch CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Fetch(args) => run_fetch(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::Reclaim(args) => run_reclaim(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
