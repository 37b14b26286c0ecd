//! Shared test utilities for the replica-sync workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for source/replica/log layouts
//! - [`faulty`]: [`FaultyFilesystem`] for injecting per-path failures

pub mod faulty;
pub mod tree;

pub use faulty::{Fault, FaultyFilesystem};
pub use tree::{Snapshot, TestTree, snapshot};
