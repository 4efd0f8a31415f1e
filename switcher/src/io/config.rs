//! Switcher configuration, optionally loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::menu::MenuOptions;
use crate::core::types::EmptyListPolicy;

/// Switcher configuration (TOML).
///
/// Passed explicitly to every component. Missing fields default to the
/// values used on an Android device with the data root at `/sdcard/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Directory scanned for builds and under which new builds are created.
    pub root: PathBuf,

    /// Pointer file read by the host application on startup.
    pub pointer_path: PathBuf,

    /// Heading shown on every dialog.
    pub display_name: String,

    /// Treat directories with an `addons`/`userdata` child as builds
    /// regardless of their name. When false only the name rule applies.
    pub infer_from_layout: bool,

    /// What to do when the scan finds no builds.
    pub empty_list: EmptyListPolicy,

    /// Prefix for the current build's menu entry.
    pub current_marker: String,

    /// Label of the trailing create-new menu entry.
    pub create_label: String,

    /// Pause between the success notification and stopping the host.
    pub quit_delay_ms: u64,

    pub host: HostConfig,
}

/// Host process control commands.
///
/// Each command is an argv array; the process name or pid is appended where
/// noted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostConfig {
    /// Name of the host process to stop.
    pub process_name: String,
    /// Graceful terminate-by-name (process name appended).
    pub force_stop_command: Vec<String>,
    /// Prints the ids of processes with a given name (process name appended).
    pub pid_lookup_command: Vec<String>,
    /// Forcibly signals a process (pid appended).
    pub kill_command: Vec<String>,
    /// Application-level shutdown.
    pub shutdown_command: Vec<String>,
    /// Application-level quit.
    pub quit_command: Vec<String>,
    /// Wall-clock limit for each command.
    pub command_timeout_secs: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            process_name: "org.xbmc.kodi".to_string(),
            force_stop_command: argv(&["am", "force-stop"]),
            pid_lookup_command: argv(&["pidof"]),
            kill_command: argv(&["kill", "-9"]),
            shutdown_command: argv(&["kodi-send", "--action=ShutDown"]),
            quit_command: argv(&["kodi-send", "--action=Quit"]),
            command_timeout_secs: 10,
        }
    }
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/sdcard/"),
            pointer_path: PathBuf::from("/sdcard/xbmc_env.properties"),
            display_name: "Build Switcher".to_string(),
            infer_from_layout: true,
            empty_list: EmptyListPolicy::default(),
            current_marker: "[CURRENT] ".to_string(),
            create_label: "+ Create New Build".to_string(),
            quit_delay_ms: 3_000,
            host: HostConfig::default(),
        }
    }
}

impl SwitcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(anyhow!("root must not be empty"));
        }
        if self.pointer_path.as_os_str().is_empty() {
            return Err(anyhow!("pointer_path must not be empty"));
        }
        if self.host.process_name.trim().is_empty() {
            return Err(anyhow!("host.process_name must not be empty"));
        }
        if self.host.command_timeout_secs == 0 {
            return Err(anyhow!("host.command_timeout_secs must be > 0"));
        }
        for (key, command) in [
            ("host.force_stop_command", &self.host.force_stop_command),
            ("host.pid_lookup_command", &self.host.pid_lookup_command),
            ("host.kill_command", &self.host.kill_command),
            ("host.shutdown_command", &self.host.shutdown_command),
            ("host.quit_command", &self.host.quit_command),
        ] {
            if command.is_empty() || command[0].trim().is_empty() {
                return Err(anyhow!("{key} must be a non-empty array"));
            }
        }
        Ok(())
    }

    pub fn menu_options(&self) -> MenuOptions {
        MenuOptions {
            current_marker: self.current_marker.clone(),
            create_label: self.create_label.clone(),
            empty_list: self.empty_list,
        }
    }

    pub fn quit_delay(&self) -> Duration {
        Duration::from_millis(self.quit_delay_ms)
    }
}

impl HostConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SwitcherConfig::default()`.
pub fn load_config(path: &Path) -> Result<SwitcherConfig> {
    if !path.exists() {
        let cfg = SwitcherConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SwitcherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SwitcherConfig::default());
        assert!(cfg.infer_from_layout);
        assert_eq!(cfg.empty_list, EmptyListPolicy::OfferCreate);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("switcher.toml");
        fs::write(
            &path,
            r#"
root = "/storage/emulated/0/"
infer_from_layout = false
empty_list = "abort"

[host]
process_name = "org.xbmc.kodi.beta"
"#,
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.root, PathBuf::from("/storage/emulated/0/"));
        assert!(!cfg.infer_from_layout);
        assert_eq!(cfg.empty_list, EmptyListPolicy::Abort);
        assert_eq!(cfg.host.process_name, "org.xbmc.kodi.beta");
        assert_eq!(cfg.host.quit_command, HostConfig::default().quit_command);
        assert_eq!(cfg.pointer_path, SwitcherConfig::default().pointer_path);
    }

    #[test]
    fn empty_command_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("switcher.toml");
        fs::write(&path, "[host]\nquit_command = []\n").expect("write");
        let err = load_config(&path).expect_err("should fail");
        assert!(err.to_string().contains("host.quit_command"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.toml");
        fs::write(&path, "this is not toml").expect("write");
        assert!(load_config(&path).is_err());
    }
}
