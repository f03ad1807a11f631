//! # Input Loading and Output Writing
//!
//! File plumbing shared by the subcommands: records come in as a JSON
//! array, tree configuration as YAML, proofs as JSON; results go to a
//! file or stdout as pretty-printed JSON. All errors carry the offending
//! path.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use atlas_core::boundary::BoundaryRecord;
use atlas_tree::{Proof, TreeConfig};

/// Load a JSON array of boundary records.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<BoundaryRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read records file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse records file {}", path.display()))
}

/// Load a YAML tree configuration.
pub fn load_config(path: &Path) -> anyhow::Result<TreeConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Load a proof JSON file.
pub fn load_proof(path: &Path) -> anyhow::Result<Proof> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read proof file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse proof file {}", path.display()))
}

/// Write `value` as pretty JSON to `output`, or to stdout when no path
/// is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let mut rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    rendered.push('\n');
    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}
