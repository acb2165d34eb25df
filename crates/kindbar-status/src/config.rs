//! Service configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`crate::ClusterStatusService`].
///
/// Every field has a sensible default; a plain `MonitorConfig::default()`
/// monitors `kind` clusters over the Docker daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// The cluster tool executable (resolved against `PATH`).
    #[serde(default = "default_kind_program")]
    pub kind_program: String,

    /// Process name that proves the container daemon is up.
    #[serde(default = "default_daemon_process")]
    pub daemon_process: String,

    /// Group the user must belong to in order to manage the daemon.
    #[serde(default = "default_required_group")]
    pub required_group: String,

    /// User whose group membership is checked; `$USER` when unset.
    #[serde(default)]
    pub username: Option<String>,

    /// Command line run in a terminal to bring clusters up.
    #[serde(default = "default_start_command")]
    pub start_command: String,

    /// Command line run in a terminal to tear clusters down.
    #[serde(default = "default_stop_command")]
    pub stop_command: String,

    /// Preferred terminal emulator; the default fallbacks apply when unset
    /// or not installed.
    #[serde(default)]
    pub terminal_emulator: Option<String>,

    /// Seconds between periodic snapshot refreshes.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Deadline in seconds for a single monitored command invocation.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

fn default_kind_program() -> String {
    "kind".to_string()
}

fn default_daemon_process() -> String {
    "dockerd".to_string()
}

fn default_required_group() -> String {
    "docker".to_string()
}

fn default_start_command() -> String {
    "kind create cluster".to_string()
}

fn default_stop_command() -> String {
    "kind delete cluster".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    380
}

fn default_command_timeout_secs() -> u64 {
    10
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            kind_program: default_kind_program(),
            daemon_process: default_daemon_process(),
            required_group: default_required_group(),
            username: None,
            start_command: default_start_command(),
            stop_command: default_stop_command(),
            terminal_emulator: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

impl MonitorConfig {
    /// The periodic refresh interval as a [`Duration`].
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// The per-command deadline as a [`Duration`].
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
