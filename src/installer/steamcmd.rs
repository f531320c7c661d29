//! Downloading workshop items with steamcmd

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::settings::Credentials;
use crate::domain::{ItemDetail, ItemId};
use crate::error::{Result, install};
use crate::installer::{Installer, files};

/// How often a running steamcmd is checked for exit or timeout
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything needed to download and place items
#[derive(Debug, Clone)]
pub struct SteamCmdOptions {
    pub steamcmd_path: PathBuf,
    pub download_path: PathBuf,
    pub mods_path: PathBuf,
    pub keys_path: Option<PathBuf>,
    pub credentials: Credentials,
    pub app_id: u32,
    pub attempts: u32,
    pub timeout: Duration,
    /// Show steamcmd output instead of discarding it
    pub verbose: bool,
}

/// Installs items by downloading them with steamcmd
pub struct SteamCmdInstaller {
    options: SteamCmdOptions,
}

impl SteamCmdInstaller {
    pub fn new(options: SteamCmdOptions) -> Self {
        Self { options }
    }

    /// Where steamcmd puts the downloaded item
    pub fn content_dir(&self, item: &ItemId) -> PathBuf {
        self.options
            .download_path
            .join("steamapps")
            .join("workshop")
            .join("content")
            .join(self.options.app_id.to_string())
            .join(item.as_str())
    }

    fn command_args(&self, item: &ItemId) -> Vec<OsString> {
        let credentials = &self.options.credentials;
        vec![
            "+@sSteamCmdForcePlatformType linux".into(),
            "+login".into(),
            credentials.username.clone().into(),
            credentials.password.clone().into(),
            "+force_install_dir".into(),
            self.options.download_path.clone().into_os_string(),
            "+workshop_download_item".into(),
            self.options.app_id.to_string().into(),
            item.as_str().into(),
            "validate".into(),
            "+quit".into(),
        ]
    }

    /// Download with up to `attempts` tries
    fn download(&self, item: &ItemId, title: &str) -> Result<()> {
        fs::create_dir_all(&self.options.download_path).map_err(|e| {
            install::failed(item.as_str(), format!("cannot create download directory: {e}"))
        })?;

        let attempts = self.options.attempts.max(1);
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self.run_once(item) {
                Ok(()) => return Ok(()),
                Err(reason) => {
                    tracing::warn!(
                        item = %item,
                        title,
                        attempt,
                        attempts,
                        reason = %reason,
                        "steamcmd download attempt failed"
                    );
                    last_error = reason;
                }
            }
        }

        Err(install::failed(
            item.as_str(),
            format!("download failed after {attempts} attempt(s): {last_error}"),
        ))
    }

    /// One steamcmd run, killed when it exceeds the timeout
    fn run_once(&self, item: &ItemId) -> std::result::Result<(), String> {
        let output = || {
            if self.options.verbose {
                Stdio::inherit()
            } else {
                Stdio::null()
            }
        };

        let mut child = Command::new(&self.options.steamcmd_path)
            .args(self.command_args(item))
            .stdin(Stdio::null())
            .stdout(output())
            .stderr(output())
            .spawn()
            .map_err(|e| {
                format!(
                    "failed to start {}: {e}",
                    self.options.steamcmd_path.display()
                )
            })?;

        let deadline = Instant::now() + self.options.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(()),
                Ok(Some(status)) => return Err(format!("steamcmd exited with {status}")),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!(
                        "steamcmd timed out after {}s",
                        self.options.timeout.as_secs_f32()
                    ));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(format!("failed to wait for steamcmd: {e}"));
                }
            }
        }
    }
}

impl Installer for SteamCmdInstaller {
    fn install(&self, item: &ItemId, detail: &ItemDetail) -> Result<()> {
        tracing::info!(item = %item, title = %detail.title, "downloading");
        self.download(item, &detail.title)?;

        let content_dir = self.content_dir(item);
        if !content_dir.is_dir() {
            return Err(install::failed(
                item.as_str(),
                format!(
                    "steamcmd reported success but {} does not exist",
                    content_dir.display()
                ),
            ));
        }

        tracing::info!(item = %item, directory = %detail.directory_name, "moving into mods directory");
        files::place_item(
            &content_dir,
            &detail.directory_name,
            &self.options.mods_path,
            self.options.keys_path.as_deref(),
        )
        .map_err(|e| install::failed(item.as_str(), e.to_string()))?;

        Ok(())
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used)]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use serial_test::serial;

    use super::*;
    use crate::error::ModsyncError;
    use crate::test_fixtures::{create_temp_dir, id};

    /// Write an executable stand-in for steamcmd
    fn fake_steamcmd(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("steamcmd.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    fn options(root: &Path, steamcmd: PathBuf) -> SteamCmdOptions {
        SteamCmdOptions {
            steamcmd_path: steamcmd,
            download_path: root.join("download"),
            mods_path: root.join("mods"),
            keys_path: Some(root.join("keys")),
            credentials: Credentials {
                username: "user".to_string(),
                password: "secret".to_string(),
            },
            app_id: 107_410,
            attempts: 3,
            timeout: Duration::from_secs(30),
            verbose: false,
        }
    }

    // $6 is the install dir, $8 the app id, $9 the item id.
    const DOWNLOAD_OK: &str = r#"dir="$6/steamapps/workshop/content/$8/$9"
mkdir -p "$dir/Addons" "$dir/Keys"
echo pbo > "$dir/Addons/Main.PBO"
echo key > "$dir/Keys/Mod.bikey""#;

    #[test]
    #[serial]
    fn test_install_places_item_and_keys() {
        let temp = create_temp_dir();
        fs::create_dir_all(temp.path().join("mods")).expect("mkdir");
        let steamcmd = fake_steamcmd(temp.path(), DOWNLOAD_OK);
        let installer = SteamCmdInstaller::new(options(temp.path(), steamcmd));

        installer
            .install(&id("450814997"), &ItemDetail::new("CBA_A3", "1 Jan"))
            .expect("install");

        let placed = temp.path().join("mods").join("@cba_a3");
        assert!(placed.join("addons").join("main.pbo").is_file());
        assert!(temp.path().join("keys").join("mod.bikey").is_file());
    }

    #[test]
    #[serial]
    fn test_failed_download_is_retried() {
        let temp = create_temp_dir();
        let counter = temp.path().join("calls");
        let steamcmd = fake_steamcmd(
            temp.path(),
            &format!("echo x >> '{}'\nexit 5", counter.display()),
        );
        let installer = SteamCmdInstaller::new(options(temp.path(), steamcmd));

        let err = installer
            .install(&id("1"), &ItemDetail::new("Broken", "1 Jan"))
            .expect_err("should fail");

        assert!(matches!(err, ModsyncError::InstallFailed { ref item, .. } if item == "1"));
        assert!(err.to_string().contains("after 3 attempt(s)"));
        let calls = fs::read_to_string(&counter).expect("read calls");
        assert_eq!(calls.lines().count(), 3);
    }

    #[test]
    #[serial]
    fn test_hung_download_is_killed() {
        let temp = create_temp_dir();
        let steamcmd = fake_steamcmd(temp.path(), "sleep 30");
        let mut options = options(temp.path(), steamcmd);
        options.attempts = 1;
        options.timeout = Duration::from_millis(300);
        let installer = SteamCmdInstaller::new(options);

        let started = Instant::now();
        let err = installer
            .install(&id("1"), &ItemDetail::new("Slow", "1 Jan"))
            .expect_err("should time out");

        assert!(err.to_string().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_missing_steamcmd_is_install_failure() {
        let temp = create_temp_dir();
        let mut options = options(temp.path(), temp.path().join("no-such-steamcmd"));
        options.attempts = 2;
        let installer = SteamCmdInstaller::new(options);

        let err = installer
            .install(&id("1"), &ItemDetail::new("Any", "1 Jan"))
            .expect_err("should fail");
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn test_command_line() {
        let temp = create_temp_dir();
        let installer =
            SteamCmdInstaller::new(options(temp.path(), PathBuf::from("steamcmd")));
        let args: Vec<String> = installer
            .command_args(&id("450814997"))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args[0], "+@sSteamCmdForcePlatformType linux");
        assert_eq!(args[1..4], ["+login", "user", "secret"]);
        assert_eq!(args[6..], ["+workshop_download_item", "107410", "450814997", "validate", "+quit"]);
        assert!(
            installer
                .content_dir(&id("450814997"))
                .ends_with("steamapps/workshop/content/107410/450814997")
        );
    }
}
