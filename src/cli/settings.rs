use clap::Args;
use std::path::PathBuf;

use crate::config::SettingsFile;

/// Settings that override the settings file
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// URL or local path of the mods manifest
    #[arg(long, env = "MODSYNC_MANIFEST_URL")]
    pub manifest_url: Option<String>,

    /// Mods directory of the game server
    #[arg(long, env = "MODSYNC_MODS_PATH")]
    pub mods_path: Option<PathBuf>,

    /// Directory server keys are copied into
    #[arg(long, env = "MODSYNC_KEYS_PATH")]
    pub keys_path: Option<PathBuf>,

    /// Timeout in seconds for each Workshop or manifest request
    #[arg(long, env = "MODSYNC_HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: Option<u64>,
}

/// Settings only needed when downloading
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// Directory steamcmd downloads into
    #[arg(long, env = "MODSYNC_DOWNLOAD_PATH")]
    pub download_path: Option<PathBuf>,

    /// steamcmd executable
    #[arg(long, env = "MODSYNC_STEAMCMD_PATH")]
    pub steamcmd_path: Option<PathBuf>,

    /// Steam account name
    #[arg(long, env = "MODSYNC_USERNAME")]
    pub username: Option<String>,

    /// Steam account password
    #[arg(long, env = "MODSYNC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Steam app id of the game
    #[arg(long, env = "MODSYNC_APP_ID")]
    pub app_id: Option<u32>,

    /// Download attempts per item
    #[arg(long, env = "MODSYNC_INSTALL_ATTEMPTS")]
    pub install_attempts: Option<u32>,

    /// Timeout in seconds for one steamcmd download
    #[arg(long, env = "MODSYNC_INSTALL_TIMEOUT_SECS")]
    pub install_timeout_secs: Option<u64>,
}

impl SettingsArgs {
    /// Overrides layered on top of the settings file
    pub fn overrides(&self) -> SettingsFile {
        SettingsFile {
            manifest_url: self.manifest_url.clone(),
            mods_path: self.mods_path.clone(),
            keys_path: self.keys_path.clone(),
            http_timeout_secs: self.http_timeout_secs,
            ..SettingsFile::default()
        }
    }
}

impl DownloadArgs {
    /// Add the download overrides to `base`
    pub fn apply(&self, base: SettingsFile) -> SettingsFile {
        SettingsFile {
            download_path: self.download_path.clone(),
            steamcmd_path: self.steamcmd_path.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            app_id: self.app_id,
            install_attempts: self.install_attempts,
            install_timeout_secs: self.install_timeout_secs,
            ..base
        }
    }
}
