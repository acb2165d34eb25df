//! Point-in-time view of cluster state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the clusters known at one instant.
///
/// Snapshots are replaced wholesale on every refresh; consumers hold
/// `Arc<ClusterSnapshot>` clones and never observe partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Cluster names in the order the tool reported them. Never contains
    /// empty or whitespace-only entries.
    pub clusters: Vec<String>,
    /// When the snapshot was captured.
    pub captured_at: DateTime<Utc>,
}

impl ClusterSnapshot {
    /// Build a snapshot from raw `kind get clusters` output, captured now.
    #[must_use]
    pub fn from_tool_output(output: &str) -> Self {
        Self {
            clusters: parse_cluster_lines(output),
            captured_at: Utc::now(),
        }
    }

    /// Whether no clusters are running (the "offer Start" state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of known clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }
}

/// Split line-oriented tool output into cluster names, dropping blank and
/// whitespace-only lines while preserving order.
#[must_use]
pub fn parse_cluster_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}
