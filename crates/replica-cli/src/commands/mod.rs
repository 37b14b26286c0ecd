//! Command implementations for replica-cli

pub mod sync;

pub use sync::run_sync;
