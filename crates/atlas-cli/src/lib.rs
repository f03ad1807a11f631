//! # atlas-cli — Atlas Command-Line Interface
//!
//! The `atlas` binary: builds commitment trees from boundary record
//! files, exports versioned snapshots, and generates and verifies
//! inclusion proofs.
//!
//! ## Subcommands
//!
//! - `build` — Build a tree and export its snapshot
//! - `prove` — Generate an inclusion proof for one leaf
//! - `verify` — Verify a proof file, optionally against a known root
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `atlas-tree` — no hashing or tree
//!   assembly here.
//! - Library crates stay log-free; all tracing output originates in this
//!   crate.

pub mod build;
pub mod input;
pub mod prove;
pub mod verify;
