//! Error types for the cluster status service.

use crate::preconditions::Precondition;
use kindbar_exec::ExecError;
use thiserror::Error;

/// Result type alias for status-service operations.
pub type Result<T> = std::result::Result<T, StatusError>;

/// Errors that can cross the service boundary to a consumer.
#[derive(Debug, Error)]
pub enum StatusError {
    /// A precondition for the requested action does not hold. The message is
    /// remediation text meant to be displayed verbatim.
    #[error("precondition not met ({precondition}): {message}")]
    PreconditionNotMet {
        /// Which precondition failed.
        precondition: Precondition,
        /// Human-readable remediation.
        message: String,
    },

    /// A refresh is already in flight; overlapping refreshes are rejected.
    #[error("a refresh is already in flight")]
    RefreshInFlight,

    /// The service has been shut down; the last snapshot stays readable but
    /// no new work is accepted.
    #[error("the service has been shut down")]
    Stopped,

    /// An external command could not be executed.
    #[error("command execution failed: {0}")]
    Exec(#[from] ExecError),
}

impl StatusError {
    /// Creates a `PreconditionNotMet` error carrying the precondition's
    /// remediation message.
    #[must_use]
    pub fn precondition_not_met(precondition: Precondition) -> Self {
        Self::PreconditionNotMet {
            precondition,
            message: precondition.remediation().to_string(),
        }
    }

    /// Returns `true` if the operation may succeed when retried later
    /// without any change to the host.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::RefreshInFlight => true,
            Self::Exec(e) => e.is_transient(),
            Self::PreconditionNotMet { .. } | Self::Stopped => false,
        }
    }
}
