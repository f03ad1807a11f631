//! # Build Subcommand
//!
//! Builds a commitment tree from a records file under a YAML
//! configuration and emits the snapshot JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use atlas_tree::Tree;

use crate::input;

/// Arguments for the build subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the boundary records file (JSON array).
    #[arg(long)]
    pub records: PathBuf,

    /// Path to the tree configuration file (YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Write the snapshot here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Build the tree and export its snapshot.
pub fn run(args: &BuildArgs) -> anyhow::Result<()> {
    let records = input::load_records(&args.records)?;
    let config = input::load_config(&args.config)?;
    tracing::info!(
        records = records.len(),
        algorithm = %config.algorithm,
        depth = config.hierarchy.depth(),
        "building tree"
    );

    let tree = Tree::build(config, &records).context("failed to build the tree")?;
    let snapshot = tree.snapshot();
    tracing::info!(
        global_root = %snapshot.global_root,
        leaves = snapshot.leaf_count,
        "tree built"
    );

    input::write_json(&snapshot, args.output.as_deref())
}
