//! sitedef CLI - Declarative site definitions.
//!
//! Provides commands for:
//! - `build`: Build every site declared in `sitedef.toml` and print it
//! - `route`: Show the welcome page served for a host
//! - `resolve`: Expand `${name}` placeholders in a path template

mod assemble;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ResolveArgs, RouteArgs};
use output::Output;

/// sitedef - Declarative site definitions.
#[derive(Parser)]
#[command(name = "sitedef", version, about)]
struct Cli {
    /// Enable verbose output (site construction logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all configured sites.
    Build(BuildArgs),
    /// Find the welcome page for a host.
    Route(RouteArgs),
    /// Resolve placeholders in a path template.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Route(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
