//! External-process execution for kindbar.
//!
//! This crate provides the two process primitives the cluster status service
//! is built on:
//!
//! - [`ProcessRunner`]: run a program asynchronously, drain stdout/stderr,
//!   and resolve with a [`CommandOutput`] on exit. Non-zero exit codes are
//!   normal results; only spawn/IO/timeout failures are errors.
//! - [`TerminalLauncher`]: fire-and-forget launch of an interactive command
//!   line in a terminal-emulator window, never awaited.
//!
//! Both sit behind traits ([`CommandExecutor`], [`TerminalLaunch`]) so
//! consumers can be tested without spawning processes.
//!
//! # Example
//!
//! ```rust,no_run
//! use kindbar_exec::{CommandExecutor, ProcessRunner};
//!
//! # async fn example() -> kindbar_exec::Result<()> {
//! let runner = ProcessRunner::new();
//! let argv = vec!["kind".to_string(), "get".to_string(), "clusters".to_string()];
//! let output = runner.run(&argv).await?;
//! println!("clusters:\n{}", output.stdout);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod lookup;
pub mod runner;
pub mod terminal;
pub mod validate;

pub use error::{ExecError, Result};
pub use lookup::find_program;
pub use runner::{CommandExecutor, CommandOutput, ProcessRunner, DEFAULT_COMMAND_TIMEOUT};
pub use terminal::{TerminalLaunch, TerminalLauncher, FALLBACK_EMULATORS};
