//! Detached terminal launch.
//!
//! Start/stop actions run inside an interactive terminal window the user can
//! watch, which is a different contract from [`crate::runner`]: the launch is
//! fire-and-forget, its output is never captured, and its exit is never
//! awaited by the caller. The command is wrapped so the window stays open
//! after completion (10 seconds or until a keypress) so the user can read
//! the output.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{ExecError, Result};
use crate::lookup::find_program;
use crate::validate::validate_argument;

/// Emulators tried when no preferred emulator is configured or found.
pub const FALLBACK_EMULATORS: &[&str] = &["x-terminal-emulator", "gnome-terminal"];

/// One-way detached launch seam.
///
/// Distinct from [`crate::CommandExecutor`] on purpose: callers must never
/// block on an interactive session.
pub trait TerminalLaunch: Send + Sync {
    /// Launch a command line in an interactive terminal and return
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns error if no terminal emulator is available or the emulator
    /// cannot be spawned. The wrapped command's own outcome is never
    /// reported.
    fn launch<'a>(
        &'a self,
        command_line: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Production [`TerminalLaunch`] that spawns a terminal-emulator window.
#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    preferred: Option<String>,
    fallbacks: Vec<String>,
}

impl TerminalLauncher {
    /// Create a launcher using only the default emulator fallbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_preferred(None)
    }

    /// Create a launcher that prefers the given emulator when it is
    /// installed, falling back to the defaults otherwise.
    #[must_use]
    pub fn with_preferred(preferred: Option<String>) -> Self {
        Self {
            preferred,
            fallbacks: FALLBACK_EMULATORS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replace the fallback emulator list.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: Vec<String>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Pick the first installed emulator: the preferred one wins, then the
    /// fallbacks in order.
    fn select_emulator(&self) -> Result<String> {
        let candidates = self
            .preferred
            .iter()
            .chain(self.fallbacks.iter())
            .map(String::as_str);

        for name in candidates.clone() {
            if find_program(name).is_some() {
                return Ok(name.to_string());
            }
        }

        let tried: Vec<&str> = candidates.collect();
        Err(ExecError::no_terminal(&tried))
    }

    async fn launch_inner(&self, command_line: &str) -> Result<()> {
        validate_argument(command_line, "command line")?;

        let emulator = self.select_emulator()?;

        let mut cmd = Command::new(&emulator);
        cmd.args(emulator_args(&emulator))
            .arg("sh")
            .arg("-c")
            .arg(wrap_command(command_line))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = cmd
            .spawn()
            .map_err(|e| ExecError::spawn(emulator.clone(), e.to_string()))?;

        info!(%emulator, command = %command_line, "launched detached terminal");

        // The session is not awaited, but the child still has to be reaped
        // once it exits.
        tokio::spawn(async move {
            if let Err(e) = child.wait().await {
                warn!(error = %e, "failed to reap detached terminal");
            }
        });

        Ok(())
    }
}

impl Default for TerminalLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalLaunch for TerminalLauncher {
    fn launch<'a>(
        &'a self,
        command_line: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.launch_inner(command_line))
    }
}

/// Wrap a command line so the terminal stays open after it finishes.
fn wrap_command(command_line: &str) -> String {
    format!("{command_line};read -t10 -p 'Press a key to exit....';")
}

/// Argument style differs between emulators: `gnome-terminal` takes the
/// command after `--`, the `x-terminal-emulator` convention uses `-e`.
fn emulator_args(emulator: &str) -> &'static [&'static str] {
    if emulator.ends_with("gnome-terminal") {
        &["--"]
    } else {
        &["-e"]
    }
}
