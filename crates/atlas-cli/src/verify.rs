//! # Verify Subcommand
//!
//! Replays a proof file against its embedded target root, optionally
//! cross-checking that root against an independently known value. A
//! rejected proof is a non-zero exit.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use atlas_core::digest::Digest;
use atlas_tree::verify_proof;

use crate::input;

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the proof file (JSON).
    #[arg(long)]
    pub proof: PathBuf,

    /// Hex digest the proof's target root must equal.
    #[arg(long)]
    pub expect_root: Option<String>,
}

/// Verify the proof; errors on rejection.
pub fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let proof = input::load_proof(&args.proof)?;

    if let Some(expected) = &args.expect_root {
        let expected = Digest::from_hex(expected).context("invalid --expect-root digest")?;
        if expected != proof.target_root {
            bail!(
                "proof targets root {}, expected {}",
                proof.target_root,
                expected
            );
        }
    }

    if !verify_proof(&proof) {
        bail!("proof verification failed");
    }
    tracing::info!(target_root = %proof.target_root, "proof verified");
    println!("verified {}", proof.target_root);
    Ok(())
}
