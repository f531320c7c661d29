//! Sync operation submodules

pub mod display;
pub mod orchestrator;
pub mod report;

pub use orchestrator::{SyncOperation, SyncOptions, plan};
