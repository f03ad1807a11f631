//! # atlas CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Atlas — commitment trees over governance boundaries.
///
/// Builds hierarchical commitment trees from boundary record sets,
/// exports snapshots for root pinning, and generates and verifies
/// inclusion proofs for the Atlas stack.
#[derive(Parser, Debug)]
#[command(name = "atlas", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a tree and export its snapshot.
    Build(atlas_cli::build::BuildArgs),
    /// Generate an inclusion proof for one leaf.
    Prove(atlas_cli::prove::ProveArgs),
    /// Verify a proof file.
    Verify(atlas_cli::verify::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => atlas_cli::build::run(&args),
        Commands::Prove(args) => atlas_cli::prove::run(&args),
        Commands::Verify(args) => atlas_cli::verify::run(&args),
    }
}
