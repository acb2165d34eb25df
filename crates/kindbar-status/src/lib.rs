//! Cluster status service for kindbar.
//!
//! Keeps a periodically refreshed, cached view of local kind clusters and
//! exposes the query/action API a status-menu frontend needs:
//!
//! - [`ClusterStatusService::snapshot`] — the cached [`ClusterSnapshot`],
//!   cheap and non-blocking.
//! - [`ClusterStatusService::refresh`] — list clusters now; overlapping
//!   refreshes are rejected, never interleaved.
//! - [`ClusterStatusService::check_preconditions`] — tool installed, daemon
//!   running, user authorized, evaluated in that order with short-circuiting.
//! - [`ClusterStatusService::perform_action`] — start/stop clusters in a
//!   detached terminal session after the precondition gate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kindbar_status::{ClusterAction, ClusterStatusService, MonitorConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> kindbar_status::Result<()> {
//! let service = Arc::new(ClusterStatusService::with_defaults(MonitorConfig::default()).await);
//! service.start_periodic_refresh(service.config().refresh_interval());
//!
//! let snapshot = service.refresh().await?;
//! if snapshot.is_empty() {
//!     service.perform_action(ClusterAction::Start).await?;
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod poller;
pub mod preconditions;
pub mod service;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::MonitorConfig;
pub use error::{Result, StatusError};
pub use poller::RefreshHandle;
pub use preconditions::{Precondition, PreconditionStatus};
pub use service::{ClusterAction, ClusterStatusService};
pub use snapshot::ClusterSnapshot;
