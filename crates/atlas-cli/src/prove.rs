//! # Prove Subcommand
//!
//! Rebuilds the tree from the records file — builds are deterministic,
//! so the rebuild commits to exactly the published roots — and emits an
//! inclusion proof for one leaf up to a target level.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use atlas_tree::{generate_proof, Level, Tree};

use crate::input;

/// Arguments for the prove subcommand.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Path to the boundary records file (JSON array).
    #[arg(long)]
    pub records: PathBuf,

    /// Path to the tree configuration file (YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Id of the leaf to prove.
    #[arg(long)]
    pub leaf: String,

    /// Target level: region, country, continent, or global.
    #[arg(long)]
    pub level: String,

    /// Write the proof here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Generate the proof and write it out.
pub fn run(args: &ProveArgs) -> anyhow::Result<()> {
    let level: Level = args.level.parse()?;
    let records = input::load_records(&args.records)?;
    let config = input::load_config(&args.config)?;

    let tree = Tree::build(config, &records).context("failed to build the tree")?;
    let proof = generate_proof(&tree, &args.leaf, level)
        .with_context(|| format!("failed to generate a proof for leaf {:?}", args.leaf))?;
    tracing::info!(
        leaf = %args.leaf,
        level = %level,
        segments = proof.segments.len(),
        target_root = %proof.target_root,
        "proof generated"
    );

    input::write_json(&proof, args.output.as_deref())
}
