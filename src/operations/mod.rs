//! Operations module for syncing the mods directory
//!
//! This module provides high-level operations that coordinate:
//! - SyncOperation: resolve, diff, install and commit ([`sync`])
//! - build_index: the lines index from manifest and snapshot ([`lines`])
//!
//! The operations coordinate with:
//! - Resolver: dependency closures and diffing (from resolver module)
//! - Installer: downloading and placing items (from installer module)
//! - ModsDir: state files and locking (from workspace module)
//! - ProgressDisplay: progress reporting (from progress module)

pub mod lines;
pub mod sync;

pub use lines::build_index;
pub use sync::{SyncOperation, SyncOptions, plan};
