//! Common test utilities for modsync integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Settings variables a developer machine might export
const SETTINGS_ENV: &[&str] = &[
    "MODSYNC_CONFIG",
    "MODSYNC_MANIFEST_URL",
    "MODSYNC_MODS_PATH",
    "MODSYNC_KEYS_PATH",
    "MODSYNC_DOWNLOAD_PATH",
    "MODSYNC_STEAMCMD_PATH",
    "MODSYNC_USERNAME",
    "MODSYNC_PASSWORD",
    "MODSYNC_APP_ID",
    "MODSYNC_INSTALL_ATTEMPTS",
    "MODSYNC_INSTALL_TIMEOUT_SECS",
    "MODSYNC_HTTP_TIMEOUT_SECS",
];

/// A scratch server layout for integration tests
pub struct TestServer {
    /// Temporary directory
    pub temp: TempDir,
    /// Mods directory inside `temp`
    pub mods: PathBuf,
}

impl TestServer {
    /// Create a new scratch server with no mods directory yet
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let mods = temp.path().join("mods");
        Self { temp, mods }
    }

    /// Create a scratch server whose mods directory holds the fixture state
    pub fn with_state() -> Self {
        let server = Self::new();
        std::fs::create_dir_all(&server.mods).expect("Failed to create mods directory");
        for file in ["mods_details.json", "modlines.json"] {
            std::fs::copy(fixture("state").join(file), server.mods.join(file))
                .expect("Failed to copy state fixture");
        }
        server
    }

    /// `modsync` with a clean environment and config dir inside the scratch area
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("modsync").expect("modsync binary should be built");
        for var in SETTINGS_ENV {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        cmd.env("HOME", self.temp.path());
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("config"));
        cmd
    }

    /// Write a settings file and return its path
    pub fn write_settings(&self, yaml: &str) -> PathBuf {
        let path = self.temp.path().join("modsync.yaml");
        std::fs::write(&path, yaml).expect("Failed to write settings");
        path
    }

    pub fn read_mods_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.mods.join(name)).expect("Failed to read state file")
    }

    pub fn mods_file_exists(&self, name: &str) -> bool {
        self.mods.join(name).exists()
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of a fixture directory under tests/common/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("common")
        .join("fixtures")
        .join(name)
}

/// Path of a manifest fixture
pub fn manifest_fixture(name: &str) -> PathBuf {
    fixture("manifests").join(name)
}

/// Lossy path string for command arguments
pub fn arg(path: &Path) -> String {
    path.display().to_string()
}
