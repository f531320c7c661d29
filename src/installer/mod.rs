//! Installing workshop items into the mods directory
//!
//! This module handles:
//! - Downloading an item with steamcmd, with retries and a timeout ([`steamcmd`])
//! - Normalizing file and directory names of the download ([`files`])
//! - Copying server keys and moving the item into place ([`files`])

pub mod files;
pub mod steamcmd;

use crate::domain::{ItemDetail, ItemId};
use crate::error::Result;

pub use steamcmd::{SteamCmdInstaller, SteamCmdOptions};

/// Installs one item so that it ends up under its directory name
///
/// Failures are reported as install errors for that item only.
pub trait Installer {
    fn install(&self, item: &ItemId, detail: &ItemDetail) -> Result<()>;
}
