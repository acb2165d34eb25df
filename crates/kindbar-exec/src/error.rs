//! Error types for process execution.
//!
//! This module defines all error types that can occur when spawning external
//! programs, draining their output, or launching detached terminal sessions.

use thiserror::Error;

/// Result type alias for process execution operations.
pub type Result<T> = std::result::Result<T, ExecError>;

/// Errors that can occur while executing external programs.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The command line was empty (no executable to run).
    #[error("empty command: at least the executable name is required")]
    EmptyCommand,

    /// A command argument or program path failed validation.
    #[error("invalid {field}: contains forbidden sequence {sequence:?}")]
    InvalidArgument {
        /// Which input failed validation.
        field: String,
        /// The offending character or pattern.
        sequence: String,
    },

    /// The executable could not be spawned (typically not found on PATH).
    #[error("failed to spawn '{program}': {message}")]
    Spawn {
        /// The program that could not be started.
        program: String,
        /// Underlying spawn failure description.
        message: String,
    },

    /// The command did not finish within the allowed time.
    #[error("command '{command}' timed out after {timeout_secs} seconds")]
    Timeout {
        /// The command that was executed.
        command: String,
        /// Deadline in seconds.
        timeout_secs: u64,
    },

    /// No usable terminal emulator was found for a detached launch.
    #[error("no terminal emulator available (tried: {tried})")]
    NoTerminal {
        /// Emulator names that were tried, comma separated.
        tried: String,
    },

    /// IO error while spawning or draining the child's streams.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(field: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            sequence: sequence.into(),
        }
    }

    /// Creates a `Spawn` error.
    #[must_use]
    pub fn spawn(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Spawn {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Creates a `Timeout` error.
    #[must_use]
    pub fn timeout(command: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            command: command.into(),
            timeout_secs,
        }
    }

    /// Creates a `NoTerminal` error from the list of emulators that were tried.
    #[must_use]
    pub fn no_terminal(tried: &[&str]) -> Self {
        Self::NoTerminal {
            tried: tried.join(", "),
        }
    }

    /// Returns `true` if this error indicates the host is missing something
    /// (program not installed, no terminal emulator) rather than a transient
    /// runtime failure.
    #[must_use]
    pub fn is_environment_error(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::NoTerminal { .. })
    }

    /// Returns `true` if retrying the same invocation later could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Io(_))
    }
}
