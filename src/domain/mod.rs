//! Domain models for modsync
//!
//! Pure value types shared by the resolver, the diff engine and the state files.

pub mod item;

pub use item::{ItemDetail, ItemId};
