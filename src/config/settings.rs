//! User settings
//!
//! Settings come from three layers, highest precedence first:
//! 1. command line flags and their `MODSYNC_*` environment variables
//! 2. the YAML settings file (`~/.config/modsync/config.yaml` or `--config`)
//! 3. built-in defaults
//!
//! Required values still missing after merging are prompted for when stdin
//! is a terminal.

use std::fmt;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use inquire::{Password, Text};
use serde::{Deserialize, Serialize};

use crate::config::manifest::ManifestLocation;
use crate::error::{Result, config};

/// Settings filename inside the modsync config directory
pub const SETTINGS_FILE: &str = "config.yaml";

/// Arma 3 app id on Steam
pub const DEFAULT_APP_ID: u32 = 107_410;
pub const DEFAULT_STEAMCMD: &str = "steamcmd";
pub const DEFAULT_INSTALL_ATTEMPTS: u32 = 3;
pub const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 1800;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// One layer of optional settings (the YAML file, or the CLI overrides)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub manifest_url: Option<String>,
    pub mods_path: Option<PathBuf>,
    pub keys_path: Option<PathBuf>,
    pub download_path: Option<PathBuf>,
    pub steamcmd_path: Option<PathBuf>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub app_id: Option<u32>,
    pub install_attempts: Option<u32>,
    pub install_timeout_secs: Option<u64>,
    pub http_timeout_secs: Option<u64>,
}

impl SettingsFile {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("modsync").join(SETTINGS_FILE))
    }

    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| config::parse_failed(path, e.to_string()))
    }

    /// Load the settings file
    ///
    /// An explicitly requested file must exist. The default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.is_file() {
            if required {
                return Err(config::not_found(&path));
            }
            return Ok(Self::default());
        }

        let yaml =
            fs::read_to_string(&path).map_err(|e| config::parse_failed(&path, e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded settings file");
        Self::from_yaml(&yaml, &path)
    }

    /// Layer `overrides` on top of `self`; values set in `overrides` win
    #[must_use]
    pub fn merge(self, overrides: SettingsFile) -> SettingsFile {
        SettingsFile {
            manifest_url: overrides.manifest_url.or(self.manifest_url),
            mods_path: overrides.mods_path.or(self.mods_path),
            keys_path: overrides.keys_path.or(self.keys_path),
            download_path: overrides.download_path.or(self.download_path),
            steamcmd_path: overrides.steamcmd_path.or(self.steamcmd_path),
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            app_id: overrides.app_id.or(self.app_id),
            install_attempts: overrides.install_attempts.or(self.install_attempts),
            install_timeout_secs: overrides.install_timeout_secs.or(self.install_timeout_secs),
            http_timeout_secs: overrides.http_timeout_secs.or(self.http_timeout_secs),
        }
    }
}

/// Which optional groups of settings a command needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    pub manifest: bool,
    pub credentials: bool,
}

impl Requirements {
    /// Only the mods directory (`status`)
    pub const MODS_DIR: Self = Self {
        manifest: false,
        credentials: false,
    };
    /// Manifest and mods directory (`plan`, `lines`)
    pub const MANIFEST: Self = Self {
        manifest: true,
        credentials: false,
    };
    /// Everything needed to download (`sync`)
    pub const SYNC: Self = Self {
        manifest: true,
        credentials: true,
    };
}

/// Steam login
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fully resolved settings for one command
#[derive(Debug, Clone)]
pub struct Settings {
    pub manifest: Option<ManifestLocation>,
    pub mods_path: PathBuf,
    pub keys_path: Option<PathBuf>,
    pub download_path: PathBuf,
    pub steamcmd_path: PathBuf,
    pub credentials: Option<Credentials>,
    pub app_id: u32,
    pub install_attempts: u32,
    pub install_timeout: Duration,
    pub http_timeout: Duration,
}

impl Settings {
    /// Resolve merged settings, prompting for missing required values
    /// when running interactively
    pub fn resolve(merged: SettingsFile, needs: Requirements) -> Result<Self> {
        Self::resolve_with(merged, needs, std::io::stdin().is_terminal())
    }

    pub(crate) fn resolve_with(
        merged: SettingsFile,
        needs: Requirements,
        interactive: bool,
    ) -> Result<Self> {
        let manifest = if needs.manifest {
            let raw = required_text(
                merged.manifest_url,
                "manifest_url",
                "Manifest URL or path:",
                interactive,
            )?;
            Some(ManifestLocation::parse(&raw))
        } else {
            merged.manifest_url.as_deref().map(ManifestLocation::parse)
        };

        let mods_path = match merged.mods_path {
            Some(path) => path,
            None => PathBuf::from(prompt_text(
                "mods_path",
                "Path to the mods directory:",
                interactive,
            )?),
        };

        let credentials = if needs.credentials {
            let username =
                required_text(merged.username, "username", "Steam username:", interactive)?;
            let password = match merged.password {
                Some(password) => password,
                None => prompt_password(interactive)?,
            };
            Some(Credentials { username, password })
        } else {
            None
        };

        let install_attempts = merged.install_attempts.unwrap_or(DEFAULT_INSTALL_ATTEMPTS);
        if install_attempts == 0 {
            return Err(config::invalid("install_attempts must be at least 1"));
        }
        let install_timeout_secs = merged
            .install_timeout_secs
            .unwrap_or(DEFAULT_INSTALL_TIMEOUT_SECS);
        let http_timeout_secs = merged.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        if install_timeout_secs == 0 || http_timeout_secs == 0 {
            return Err(config::invalid("timeouts must be greater than zero"));
        }

        Ok(Self {
            manifest,
            mods_path,
            keys_path: merged.keys_path,
            download_path: merged
                .download_path
                .unwrap_or_else(crate::temp::default_download_dir),
            steamcmd_path: merged
                .steamcmd_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STEAMCMD)),
            credentials,
            app_id: merged.app_id.unwrap_or(DEFAULT_APP_ID),
            install_attempts,
            install_timeout: Duration::from_secs(install_timeout_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// The manifest location; only absent when the command did not ask for it
    pub fn manifest_location(&self) -> Result<&ManifestLocation> {
        self.manifest
            .as_ref()
            .ok_or_else(|| config::missing("manifest_url"))
    }
}

fn required_text(
    value: Option<String>,
    name: &str,
    message: &str,
    interactive: bool,
) -> Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value),
        None => prompt_text(name, message, interactive),
    }
}

fn prompt_text(name: &str, message: &str, interactive: bool) -> Result<String> {
    if !interactive {
        return Err(config::missing(name));
    }
    let answer = Text::new(message).prompt()?;
    if answer.trim().is_empty() {
        return Err(config::missing(name));
    }
    Ok(answer.trim().to_string())
}

fn prompt_password(interactive: bool) -> Result<String> {
    if !interactive {
        return Err(config::missing("password"));
    }
    Ok(Password::new("Steam password:")
        .without_confirmation()
        .prompt()?)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ModsyncError;
    use crate::test_fixtures::create_temp_dir;

    fn full_file() -> SettingsFile {
        SettingsFile {
            manifest_url: Some("https://example.test/manifest.json".to_string()),
            mods_path: Some(PathBuf::from("/srv/arma/mods")),
            username: Some("steamuser".to_string()),
            password: Some("hunter2".to_string()),
            ..SettingsFile::default()
        }
    }

    #[test]
    fn test_defaults_apply() {
        let settings =
            Settings::resolve_with(full_file(), Requirements::SYNC, false).expect("resolve");
        assert_eq!(settings.app_id, DEFAULT_APP_ID);
        assert_eq!(settings.install_attempts, 3);
        assert_eq!(settings.install_timeout, Duration::from_secs(1800));
        assert_eq!(settings.http_timeout, Duration::from_secs(30));
        assert_eq!(settings.steamcmd_path, PathBuf::from("steamcmd"));
        assert!(settings.download_path.is_absolute());
        assert_eq!(
            settings.manifest,
            Some(ManifestLocation::Remote(
                "https://example.test/manifest.json".to_string()
            ))
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = SettingsFile {
            app_id: Some(1),
            install_attempts: Some(5),
            ..full_file()
        };
        let overrides = SettingsFile {
            install_attempts: Some(2),
            mods_path: Some(PathBuf::from("/other")),
            ..SettingsFile::default()
        };
        let merged = file.merge(overrides);
        assert_eq!(merged.app_id, Some(1));
        assert_eq!(merged.install_attempts, Some(2));
        assert_eq!(merged.mods_path, Some(PathBuf::from("/other")));
    }

    #[test]
    fn test_missing_setting_without_terminal() {
        let file = SettingsFile {
            password: None,
            ..full_file()
        };
        let err = Settings::resolve_with(file, Requirements::SYNC, false).expect_err("fail");
        assert!(matches!(err, ModsyncError::MissingSetting { ref name } if name == "password"));
    }

    #[test]
    fn test_credentials_not_needed_for_status() {
        let file = SettingsFile {
            mods_path: Some(PathBuf::from("/srv/arma/mods")),
            ..SettingsFile::default()
        };
        let settings =
            Settings::resolve_with(file, Requirements::MODS_DIR, false).expect("resolve");
        assert!(settings.credentials.is_none());
        assert!(settings.manifest.is_none());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let file = SettingsFile {
            install_attempts: Some(0),
            ..full_file()
        };
        let err = Settings::resolve_with(file, Requirements::SYNC, false).expect_err("fail");
        assert!(matches!(err, ModsyncError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let settings =
            Settings::resolve_with(full_file(), Requirements::SYNC, false).expect("resolve");
        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("steamuser"));
    }

    #[test]
    fn test_load_yaml_file() {
        let temp = create_temp_dir();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "manifest_url: ./manifest.json\nmods_path: /srv/mods\ninstall_attempts: 4\n",
        )
        .expect("write");

        let file = SettingsFile::load(Some(&path)).expect("load");
        assert_eq!(file.manifest_url.as_deref(), Some("./manifest.json"));
        assert_eq!(file.install_attempts, Some(4));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = create_temp_dir();
        let err = SettingsFile::load(Some(&temp.path().join("nope.yaml"))).expect_err("fail");
        assert!(matches!(err, ModsyncError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = SettingsFile::from_yaml("mods_dir: /srv\n", Path::new("config.yaml"))
            .expect_err("fail");
        assert!(matches!(err, ModsyncError::ConfigParseFailed { .. }));
    }
}
