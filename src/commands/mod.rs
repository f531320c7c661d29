//! Command implementations for the modsync CLI

pub mod completions;
pub mod helpers;
pub mod lines;
pub mod plan;
pub mod status;
pub mod sync;
pub mod version;
