//! Asynchronous external-process execution.
//!
//! [`ProcessRunner`] spawns a child process, drains its stdout/stderr, and
//! resolves with a [`CommandOutput`] once the child exits. A non-zero exit
//! status is a normal result, not an error: "the command ran but reported a
//! problem" is an expected outcome (an empty cluster list, for instance).
//! Errors are reserved for spawn failures, stream IO failures, and timeouts.
//!
//! The [`CommandExecutor`] trait is the seam consumers program against, so
//! tests can substitute a scripted executor without spawning anything.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::{ExecError, Result};
use crate::validate::{validate_argument, validate_program_path};

/// Default deadline for a single command invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Captured output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Fully drained standard output, decoded lossily as UTF-8.
    pub stdout: String,
    /// Fully drained standard error, decoded lossily as UTF-8.
    pub stderr: String,
    /// Exit status code (0 for success, -1 if terminated by signal).
    pub exit_code: i32,
}

impl CommandOutput {
    /// Check if the command succeeded (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Asynchronous command execution seam.
///
/// One invocation spawns one child process; the future resolves when the
/// child exits and its streams are drained. Implementations must reap the
/// child on completion and must not leak it on cancellation.
pub trait CommandExecutor: Send + Sync {
    /// Run a command and capture its output.
    ///
    /// # Errors
    ///
    /// Returns error if `argv` is empty or invalid, the program cannot be
    /// spawned, stream IO fails, or the deadline is exceeded. A non-zero
    /// exit status is returned as a successful `CommandOutput`.
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>>;
}

/// Production [`CommandExecutor`] backed by `tokio::process`.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner with the default command timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Some(DEFAULT_COMMAND_TIMEOUT),
        }
    }

    /// Create a runner with a custom deadline, or `None` for no deadline.
    #[must_use]
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    async fn run_inner(&self, argv: &[String]) -> Result<CommandOutput> {
        let (program, args) = argv.split_first().ok_or(ExecError::EmptyCommand)?;

        validate_program_path(program)?;
        for arg in args {
            validate_argument(arg, "argument")?;
        }

        trace!(command = %argv.join(" "), "spawning command");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // If the future is dropped mid-flight the child is killed and
            // reaped by the runtime instead of lingering as a zombie.
            .kill_on_drop(true);

        let wait = cmd.output();

        let output = match self.timeout {
            Some(deadline) => tokio::time::timeout(deadline, wait)
                .await
                .map_err(|_| ExecError::timeout(argv.join(" "), deadline.as_secs()))?,
            None => wait.await,
        };

        let output = output.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExecError::spawn(program.clone(), e.to_string())
            } else {
                ExecError::Io(e)
            }
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(command = %argv.join(" "), exit_code, "command finished");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        })
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ProcessRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(self.run_inner(argv))
    }
}
