//! Scripted fakes for the process-execution seams, shared by unit tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use kindbar_exec::{CommandExecutor, CommandOutput, ExecError, TerminalLaunch};

/// Build a successful [`CommandOutput`] with the given stdout.
pub fn ok_output(stdout: &str) -> CommandOutput {
    CommandOutput {
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code: 0,
    }
}

/// Build a failed [`CommandOutput`] with the given stderr.
pub fn failed_output(stderr: &str) -> CommandOutput {
    CommandOutput {
        stdout: String::new(),
        stderr: stderr.to_string(),
        exit_code: 1,
    }
}

type Handler =
    Box<dyn Fn(&[String]) -> Result<CommandOutput, ExecError> + Send + Sync + 'static>;

/// A [`CommandExecutor`] that records every invocation and answers from a
/// scripted handler, optionally after a delay (to test overlap handling).
pub struct ScriptedExecutor {
    calls: Mutex<Vec<Vec<String>>>,
    handler: Handler,
    delay: Option<Duration>,
}

impl ScriptedExecutor {
    pub fn new(
        handler: impl Fn(&[String]) -> Result<CommandOutput, ExecError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every argv run so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Number of invocations whose program matches `program`.
    pub fn count_program(&self, program: &str) -> usize {
        self.calls()
            .iter()
            .filter(|argv| argv.first().map(String::as_str) == Some(program))
            .count()
    }

    /// Forget recorded invocations (e.g. those made during construction).
    pub fn reset_calls(&self) {
        self.calls.lock().expect("calls lock").clear();
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>> {
        self.calls.lock().expect("calls lock").push(argv.to_vec());
        let result = (self.handler)(argv);
        let delay = self.delay;
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

/// A [`TerminalLaunch`] that records launched command lines.
#[derive(Default)]
pub struct RecordingTerminal {
    launches: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal that refuses every launch, as if no emulator existed.
    pub fn unavailable() -> Self {
        Self {
            launches: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn launches(&self) -> Vec<String> {
        self.launches.lock().expect("launches lock").clone()
    }
}

impl TerminalLaunch for RecordingTerminal {
    fn launch<'a>(
        &'a self,
        command_line: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), ExecError>> + Send + 'a>> {
        let result = if self.fail {
            Err(ExecError::no_terminal(&["x-terminal-emulator"]))
        } else {
            self.launches
                .lock()
                .expect("launches lock")
                .push(command_line.to_string());
            Ok(())
        };
        Box::pin(async move { result })
    }
}
