//! The cluster status service.
//!
//! Wraps the `kind` CLI (and a couple of host probes) behind a small
//! query/action API: a cached snapshot of cluster names, an explicit refresh,
//! precondition checks, and detached start/stop actions. A presentation
//! layer polls [`ClusterStatusService::snapshot`] and renders the result; it
//! never talks to external processes itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use kindbar_exec::{
    CommandExecutor, ProcessRunner, TerminalLaunch, TerminalLauncher, find_program,
};

use crate::config::MonitorConfig;
use crate::error::{Result, StatusError};
use crate::poller::{RefreshHandle, start_refresh_task};
use crate::preconditions::{
    Precondition, PreconditionStatus, daemon_listed, groups_contain,
};
use crate::snapshot::ClusterSnapshot;

/// A user-triggered cluster action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterAction {
    /// Bring clusters up.
    Start,
    /// Tear clusters down.
    Stop,
}

impl ClusterAction {
    /// Menu label for the action.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }
}

/// Service over a cached cluster snapshot plus a periodic refresh timer.
///
/// The static precondition facts (tool installed, user authorized) are
/// computed once at construction; the daemon probe runs on every gate since
/// the daemon can stop or start at any time. Overlapping refreshes are
/// rejected with [`StatusError::RefreshInFlight`] — one atomic in-flight
/// marker is shared by manual and periodic triggers.
pub struct ClusterStatusService {
    config: MonitorConfig,
    executor: Arc<dyn CommandExecutor>,
    terminal: Arc<dyn TerminalLaunch>,
    tool_installed: bool,
    user_authorized: bool,
    snapshot: RwLock<Option<Arc<ClusterSnapshot>>>,
    refreshing: AtomicBool,
    stopped: AtomicBool,
    poller: Mutex<Option<RefreshHandle>>,
}

impl ClusterStatusService {
    /// Create a service over the given execution seams, computing the
    /// static precondition facts.
    pub async fn new(
        config: MonitorConfig,
        executor: Arc<dyn CommandExecutor>,
        terminal: Arc<dyn TerminalLaunch>,
    ) -> Self {
        let tool_installed = find_program(&config.kind_program).is_some();
        let user_authorized = probe_group_membership(executor.as_ref(), &config).await;

        debug!(
            tool = %config.kind_program,
            tool_installed,
            user_authorized,
            "cluster status service created"
        );

        Self {
            config,
            executor,
            terminal,
            tool_installed,
            user_authorized,
            snapshot: RwLock::new(None),
            refreshing: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            poller: Mutex::new(None),
        }
    }

    /// Create a service wired to the production process runner and terminal
    /// launcher.
    pub async fn with_defaults(config: MonitorConfig) -> Self {
        let runner = ProcessRunner::with_timeout(Some(config.command_timeout()));
        let terminal = TerminalLauncher::with_preferred(config.terminal_emulator.clone());
        Self::new(config, Arc::new(runner), Arc::new(terminal)).await
    }

    /// The service configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Whether the cluster tool was on `PATH` at construction time.
    #[must_use]
    pub fn tool_installed(&self) -> bool {
        self.tool_installed
    }

    /// Whether the user belonged to the required group at construction time.
    #[must_use]
    pub fn user_authorized(&self) -> bool {
        self.user_authorized
    }

    /// The last good snapshot, if any. Cheap; never blocks on a process.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<ClusterSnapshot>> {
        self.snapshot.read().clone()
    }

    /// Probe whether the container daemon is currently running.
    ///
    /// Re-checked on every call; a failed probe counts as "not running" (the
    /// probe error is logged, not surfaced).
    pub async fn is_daemon_running(&self) -> bool {
        let argv = vec!["ps".to_string(), "cax".to_string()];
        match self.executor.run(&argv).await {
            Ok(output) if output.success() => {
                daemon_listed(&output.stdout, &self.config.daemon_process)
            }
            Ok(output) => {
                debug!(exit_code = output.exit_code, "process listing failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "could not probe for daemon process");
                false
            }
        }
    }

    /// Evaluate the preconditions in fixed order (tool installed, daemon
    /// running, user authorized), stopping at the first failure.
    ///
    /// Returns the evaluated-so-far list including the failing entry; checks
    /// past the first failure are never run, so no process is spawned for
    /// them.
    pub async fn check_preconditions(&self) -> Vec<PreconditionStatus> {
        let mut statuses = Vec::with_capacity(3);

        statuses.push(PreconditionStatus {
            precondition: Precondition::ToolInstalled,
            satisfied: self.tool_installed,
        });
        if !self.tool_installed {
            return statuses;
        }

        let daemon_running = self.is_daemon_running().await;
        statuses.push(PreconditionStatus {
            precondition: Precondition::DaemonRunning,
            satisfied: daemon_running,
        });
        if !daemon_running {
            return statuses;
        }

        statuses.push(PreconditionStatus {
            precondition: Precondition::UserAuthorized,
            satisfied: self.user_authorized,
        });
        statuses
    }

    async fn ensure_preconditions(&self) -> Result<()> {
        for status in self.check_preconditions().await {
            if !status.satisfied {
                return Err(StatusError::precondition_not_met(status.precondition));
            }
        }
        Ok(())
    }

    /// List clusters now and atomically replace the cached snapshot.
    ///
    /// A non-zero exit or unparseable output is the zero-clusters state, not
    /// an error. A refresh already being in flight is rejected with
    /// [`StatusError::RefreshInFlight`].
    ///
    /// # Errors
    ///
    /// Returns error if the service is stopped, a refresh is in flight, or
    /// the list command cannot be executed at all.
    pub async fn refresh(&self) -> Result<Arc<ClusterSnapshot>> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(StatusError::Stopped);
        }

        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(StatusError::RefreshInFlight);
        }
        let _guard = InFlightGuard(&self.refreshing);

        let argv = vec![
            self.config.kind_program.clone(),
            "get".to_string(),
            "clusters".to_string(),
        ];
        let output = self.executor.run(&argv).await?;

        let snapshot = if output.success() {
            Arc::new(ClusterSnapshot::from_tool_output(&output.stdout))
        } else {
            // "No clusters" is a valid operational state, not a failure.
            debug!(
                exit_code = output.exit_code,
                stderr = %output.stderr.trim(),
                "cluster listing reported an error, treating as zero clusters"
            );
            Arc::new(ClusterSnapshot::from_tool_output(""))
        };

        // A result that lands after shutdown must not touch the retained
        // snapshot.
        if self.stopped.load(Ordering::SeqCst) {
            return Err(StatusError::Stopped);
        }

        debug!(clusters = snapshot.len(), "snapshot refreshed");
        *self.snapshot.write() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Start (or stop) clusters via a detached terminal session.
    ///
    /// The full precondition chain is evaluated first; the launch itself is
    /// fire-and-forget — this method returns as soon as the terminal is
    /// spawned and never reports the session's outcome.
    ///
    /// # Errors
    ///
    /// Returns error if the service is stopped, a precondition is
    /// unsatisfied (carrying its remediation message), or no terminal
    /// emulator can be spawned.
    pub async fn perform_action(&self, action: ClusterAction) -> Result<()> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(StatusError::Stopped);
        }

        self.ensure_preconditions().await?;

        let command_line = match action {
            ClusterAction::Start => &self.config.start_command,
            ClusterAction::Stop => &self.config.stop_command,
        };

        self.terminal.launch(command_line).await?;
        info!(action = action.label(), command = %command_line, "cluster action launched");
        Ok(())
    }

    /// Start the periodic refresh task with the given interval (see
    /// [`MonitorConfig::refresh_interval`] for the configured default). A
    /// task already running is replaced; a stopped service spawns nothing.
    pub fn start_periodic_refresh(self: &Arc<Self>, interval: Duration) {
        if self.is_stopped() {
            debug!("service is stopped, not starting the refresh task");
            return;
        }
        let handle = start_refresh_task(Arc::clone(self), interval);
        if let Some(previous) = self.poller.lock().replace(handle) {
            previous.stop();
        }
    }

    /// Cancel the periodic refresh task, keeping the service usable.
    pub fn stop_periodic_refresh(&self) {
        if let Some(handle) = self.poller.lock().take() {
            handle.stop();
        }
    }

    /// Tear the service down: cancel the timer and reject all further work.
    /// The last snapshot stays readable; an in-flight refresh discards its
    /// result.
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.stop_periodic_refresh();
        info!("cluster status service shut down");
    }

    /// Whether [`Self::shutdown`] has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Clears the in-flight marker on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One-shot group membership probe run at construction.
async fn probe_group_membership(executor: &dyn CommandExecutor, config: &MonitorConfig) -> bool {
    let mut argv = vec!["groups".to_string()];
    let username = config
        .username
        .clone()
        .or_else(|| std::env::var("USER").ok());
    if let Some(username) = username {
        argv.push(username);
    }

    match executor.run(&argv).await {
        Ok(output) if output.success() => {
            groups_contain(&output.stdout, &config.required_group)
        }
        Ok(output) => {
            warn!(exit_code = output.exit_code, "group lookup failed");
            false
        }
        Err(e) => {
            warn!(error = %e, "could not determine group membership");
            false
        }
    }
}
