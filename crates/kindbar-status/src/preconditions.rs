//! Host-environment preconditions for cluster actions.
//!
//! Three facts must hold before starting or stopping clusters, checked in a
//! fixed order with short-circuiting: the cluster tool is installed, the
//! container daemon is running, and the user is authorized to talk to it.
//! The first two failures make later checks meaningless, so evaluation stops
//! at the first unsatisfied precondition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fact about the host that must hold before an action is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    /// The cluster tool executable is on `PATH`.
    ToolInstalled,
    /// The container daemon process is running.
    DaemonRunning,
    /// The user belongs to the group that may manage the daemon.
    UserAuthorized,
}

impl Precondition {
    /// Human-readable remediation shown when the precondition fails.
    #[must_use]
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::ToolInstalled => "Please install kind to use this plugin",
            Self::DaemonRunning => {
                "Please start your Docker service first!\n(Seems Docker daemon not started yet.)"
            }
            Self::UserAuthorized => {
                "Please put your Linux user into `docker` group first!\n(Seems not in that yet.)"
            }
        }
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ToolInstalled => "tool installed",
            Self::DaemonRunning => "daemon running",
            Self::UserAuthorized => "user authorized",
        };
        write!(f, "{name}")
    }
}

/// The evaluated state of one precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionStatus {
    /// Which precondition was evaluated.
    pub precondition: Precondition,
    /// Whether it held.
    pub satisfied: bool,
}

impl PreconditionStatus {
    /// Shorthand for a satisfied precondition.
    #[must_use]
    pub fn satisfied(precondition: Precondition) -> Self {
        Self {
            precondition,
            satisfied: true,
        }
    }

    /// Shorthand for an unsatisfied precondition.
    #[must_use]
    pub fn unsatisfied(precondition: Precondition) -> Self {
        Self {
            precondition,
            satisfied: false,
        }
    }
}

/// Whether a `groups` output contains the required group as a whole token.
///
/// Whole-token matching keeps `dockerish` from satisfying `docker`.
#[must_use]
pub fn groups_contain(groups_output: &str, required_group: &str) -> bool {
    groups_output
        .split_whitespace()
        .any(|group| group == required_group)
}

/// Whether a process listing shows the daemon as a whole token on any line.
#[must_use]
pub fn daemon_listed(ps_output: &str, daemon_process: &str) -> bool {
    ps_output
        .lines()
        .any(|line| line.split_whitespace().any(|token| token == daemon_process))
}
