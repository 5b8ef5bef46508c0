//! Process supervision.
//!
//! The supervisor spawns the processes described by the config,
//! watches them, and respawns them on unexpected exit according to
//! the restart policy.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ SupervisorHandle (clonable client)           │
//! │  - start/stop/restart/shutdown via channel   │
//! │  - snapshot() reads the shared table         │
//! └──────────────────────────────────────────────┘
//!                │ commands          ▲ snapshots
//!                ▼                   │
//! ┌──────────────────────────────────────────────┐
//! │ Coordinator task (single writer)             │
//! │  - owns the handle table                     │
//! │  - every state transition happens here       │
//! └──────────────────────────────────────────────┘
//!                │ spawn              ▲ exit / timer events
//!                ▼                    │
//! ┌──────────────────────────────────────────────┐
//! │ Worker tasks                                 │
//! │  - waiter per child (owns the Child)         │
//! │  - grace timers, restart timers              │
//! │  - stdout/stderr line forwarders             │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Because every transition runs on the coordinator, restart decisions
//! for a given handle are strictly sequential. Workers never touch the
//! table; they only report events. External callers read a snapshot
//! copy without ever contending with the coordinator.
//!
//! Dropping the last [`SupervisorHandle`] closes the command channel,
//! which the coordinator treats as a shutdown request.

mod backoff;
mod handle;
mod spawn;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::ProcessSpec;

pub use backoff::{
    DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_MAX_RESTARTS, DEFAULT_STABLE_UPTIME,
    RestartPolicy,
};
pub use handle::{HandleSnapshot, ProcessState};
pub use spawn::{INSTANCE_ENV_VAR, SpawnError};

/// Default time allowed between the stop signal and force kill.
pub const DEFAULT_GRACE_TIMEOUT: Duration = Duration::from_secs(5);

/// Command channel capacity.
const COMMAND_CHANNEL_SIZE: usize = 32;

/// Event channel capacity.
const EVENT_CHANNEL_SIZE: usize = 64;

/// Signal delivery error type.
#[derive(Debug, Clone, Error)]
pub enum SignalError {
    /// The termination signal could not be delivered.
    #[error("Failed to signal pid {pid}: {message}")]
    Deliver {
        /// Target process id.
        pid: u32,
        /// OS error description.
        message: String,
    },
}

/// Supervisor error type.
#[derive(Debug, Clone, Error)]
pub enum SupervisorError {
    /// Spawning an OS process failed.
    #[error(transparent)]
    Spawn(#[from] SpawnError),

    /// Signal delivery failed.
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// No app with that name has ever been started.
    #[error("Unknown process '{0}'")]
    UnknownProcess(String),

    /// The app already has live handles.
    #[error("App '{0}' is already running")]
    AlreadyRunning(String),

    /// Shutdown is in progress; no new processes are accepted.
    #[error("Supervisor is shutting down")]
    ShuttingDown,

    /// The coordinator task is gone.
    #[error("Supervisor is shut down")]
    ChannelClosed,
}

type Ack = oneshot::Sender<Result<(), SupervisorError>>;

/// Requests from clients to the coordinator.
enum Command {
    Start(Arc<ProcessSpec>, Ack),
    Stop(String, Ack),
    Restart(String, Ack),
    Shutdown(oneshot::Sender<()>),
}

/// Reports from worker tasks back to the coordinator.
enum Event {
    Exited {
        name: String,
        instance: u32,
        generation: u64,
        exit_code: Option<i32>,
    },
    RestartDue {
        name: String,
        instance: u32,
        generation: u64,
    },
    GraceExpired {
        name: String,
    },
}

/// Internal per-instance record. Only the coordinator touches this.
struct Handle {
    spec: Arc<ProcessSpec>,
    instance: u32,
    /// Bumped on every spawn and every cancelled restart; events
    /// carrying an older generation are stale and ignored.
    generation: u64,
    pid: Option<u32>,
    state: ProcessState,
    last_exit_code: Option<i32>,
    restart_count: u32,
    started_at: Option<Instant>,
    /// An explicit stop is in flight for this handle.
    stopping: bool,
    /// Tells the waiter task to force-kill the child.
    kill_tx: Option<oneshot::Sender<()>>,
}

impl Handle {
    fn new(spec: Arc<ProcessSpec>, instance: u32) -> Self {
        Self {
            spec,
            instance,
            generation: 0,
            pid: None,
            state: ProcessState::Stopped,
            last_exit_code: None,
            restart_count: 0,
            started_at: None,
            stopping: false,
            kill_tx: None,
        }
    }

    fn snapshot(&self) -> HandleSnapshot {
        HandleSnapshot {
            name: self.spec.name.clone(),
            instance: self.instance,
            pid: self.pid,
            state: self.state,
            last_exit_code: self.last_exit_code,
            restart_count: self.restart_count,
            started_at: self.started_at,
        }
    }

    fn is_live(&self) -> bool {
        !self.state.is_terminal()
    }
}

/// Supervisor builder.
///
/// Configure the restart policy and grace timeout, then call
/// [`Supervisor::spawn`] to launch the coordinator task and get a
/// [`SupervisorHandle`] for it.
#[derive(Debug, Clone)]
pub struct Supervisor {
    policy: RestartPolicy,
    grace_timeout: Duration,
}

impl Supervisor {
    /// Creates a supervisor with default policy and grace timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: RestartPolicy::default(),
            grace_timeout: DEFAULT_GRACE_TIMEOUT,
        }
    }

    /// Sets the restart policy.
    #[must_use]
    pub fn restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the stop grace timeout.
    #[must_use]
    pub fn grace_timeout(mut self, timeout: Duration) -> Self {
        self.grace_timeout = timeout;
        self
    }

    /// Launches the coordinator task on the current tokio runtime.
    #[must_use]
    pub fn spawn(self) -> SupervisorHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let snapshots = Arc::new(RwLock::new(Vec::new()));

        let coordinator = Coordinator {
            policy: self.policy,
            grace_timeout: self.grace_timeout,
            handles: HashMap::new(),
            event_tx,
            snapshots: Arc::clone(&snapshots),
            pending_stops: HashMap::new(),
            pending_restarts: HashMap::new(),
            shutdown_ack: None,
            shutting_down: false,
            commands_closed: false,
            running: true,
        };
        tokio::spawn(coordinator.run(command_rx, event_rx));

        SupervisorHandle {
            commands: command_tx,
            snapshots,
        }
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

/// Clonable client for a running supervisor.
#[derive(Clone)]
pub struct SupervisorHandle {
    commands: mpsc::Sender<Command>,
    snapshots: Arc<RwLock<Vec<HandleSnapshot>>>,
}

impl SupervisorHandle {
    /// Starts all instances of a spec.
    ///
    /// # Errors
    /// Fails with [`SupervisorError::AlreadyRunning`] if the app has
    /// live handles, [`SupervisorError::ShuttingDown`] once shutdown
    /// has begun, or surfaces the first [`SpawnError`] if any instance
    /// could not be spawned (failed instances still retry under
    /// autorestart).
    pub async fn start(&self, spec: Arc<ProcessSpec>) -> Result<(), SupervisorError> {
        self.request(|ack| Command::Start(spec, ack)).await
    }

    /// Stops all instances of an app, waiting up to the grace timeout
    /// before force-killing stragglers. Idempotent for known names.
    ///
    /// # Errors
    /// Fails with [`SupervisorError::UnknownProcess`] for a name that
    /// was never started.
    pub async fn stop(&self, name: &str) -> Result<(), SupervisorError> {
        let name = name.to_string();
        self.request(|ack| Command::Stop(name, ack)).await
    }

    /// Stops and then starts all instances of an app.
    ///
    /// # Errors
    /// Fails like [`SupervisorHandle::stop`] followed by a start.
    pub async fn restart(&self, name: &str) -> Result<(), SupervisorError> {
        let name = name.to_string();
        self.request(|ack| Command::Restart(name, ack)).await
    }

    /// Stops every app and terminates the coordinator.
    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        if self.commands.send(Command::Shutdown(tx)).await.is_ok() {
            let _ = rx.await;
        }
    }

    /// Returns a read-only snapshot of every handle.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HandleSnapshot> {
        self.snapshots
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the snapshots for one app.
    #[must_use]
    pub fn status(&self, name: &str) -> Vec<HandleSnapshot> {
        self.snapshot()
            .into_iter()
            .filter(|s| s.name == name)
            .collect()
    }

    async fn request<F>(&self, make: F) -> Result<(), SupervisorError>
    where
        F: FnOnce(Ack) -> Command,
    {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .await
            .map_err(|_| SupervisorError::ChannelClosed)?;
        rx.await.map_err(|_| SupervisorError::ChannelClosed)?
    }
}

/// Single-writer owner of the handle table.
struct Coordinator {
    policy: RestartPolicy,
    grace_timeout: Duration,
    handles: HashMap<String, Vec<Handle>>,
    event_tx: mpsc::Sender<Event>,
    snapshots: Arc<RwLock<Vec<HandleSnapshot>>>,
    pending_stops: HashMap<String, Vec<Ack>>,
    pending_restarts: HashMap<String, Vec<Ack>>,
    shutdown_ack: Option<oneshot::Sender<()>>,
    shutting_down: bool,
    commands_closed: bool,
    running: bool,
}

impl Coordinator {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>, mut events: mpsc::Receiver<Event>) {
        debug!("Supervisor coordinator started");

        while self.running {
            tokio::select! {
                command = commands.recv(), if !self.commands_closed => match command {
                    Some(command) => self.on_command(command),
                    None => {
                        // All client handles dropped
                        self.commands_closed = true;
                        self.begin_shutdown(None);
                    }
                },
                Some(event) = events.recv() => self.on_event(event),
            }
        }

        debug!("Supervisor coordinator stopped");
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::Start(spec, ack) => {
                let result = self.start_app(spec);
                let _ = ack.send(result);
            }
            Command::Stop(name, ack) => match self.begin_stop(&name) {
                Err(err) => {
                    let _ = ack.send(Err(err));
                }
                Ok(false) => {
                    // Nothing live; idempotent no-op
                    self.publish();
                    let _ = ack.send(Ok(()));
                }
                Ok(true) => {
                    self.pending_stops.entry(name).or_default().push(ack);
                    self.publish();
                }
            },
            Command::Restart(name, ack) => match self.begin_stop(&name) {
                Err(err) => {
                    let _ = ack.send(Err(err));
                }
                Ok(false) => {
                    let result = self.respawn_app(&name);
                    let _ = ack.send(result);
                }
                Ok(true) => {
                    self.pending_restarts.entry(name).or_default().push(ack);
                    self.publish();
                }
            },
            Command::Shutdown(ack) => self.begin_shutdown(Some(ack)),
        }
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Exited {
                name,
                instance,
                generation,
                exit_code,
            } => self.on_exited(&name, instance, generation, exit_code),
            Event::RestartDue {
                name,
                instance,
                generation,
            } => self.on_restart_due(&name, instance, generation),
            Event::GraceExpired { name } => self.on_grace_expired(&name),
        }
    }

    /// Starts (or re-creates) every instance of a spec.
    fn start_app(&mut self, spec: Arc<ProcessSpec>) -> Result<(), SupervisorError> {
        if self.shutting_down {
            // A process started now would never be stopped again
            return Err(SupervisorError::ShuttingDown);
        }
        if let Some(list) = self.handles.get(&spec.name) {
            if list.iter().any(Handle::is_live) {
                return Err(SupervisorError::AlreadyRunning(spec.name.clone()));
            }
        }
        if spec.watch {
            warn!(
                app = %spec.name,
                "watch=true is not supported; file changes will not trigger restarts"
            );
        }

        let mut first_error = None;
        let mut list = Vec::with_capacity(spec.instances as usize);
        for instance in 0..spec.instances {
            let mut handle = Handle::new(Arc::clone(&spec), instance);
            if let Err(err) = Self::spawn_handle(&self.policy, &self.event_tx, &mut handle) {
                first_error.get_or_insert(err);
            }
            list.push(handle);
        }
        self.handles.insert(spec.name.clone(), list);
        self.publish();

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Re-creates an app from the spec stored on its (terminal) handles.
    fn respawn_app(&mut self, name: &str) -> Result<(), SupervisorError> {
        let spec = self
            .handles
            .get(name)
            .and_then(|list| list.first())
            .map(|handle| Arc::clone(&handle.spec))
            .ok_or_else(|| SupervisorError::UnknownProcess(name.to_string()))?;
        self.start_app(spec)
    }

    /// Initiates a stop for every live handle of `name`.
    ///
    /// Returns `Ok(true)` if any handle is still exiting (completion is
    /// reported later through the handle table), `Ok(false)` if the app
    /// was already fully stopped.
    fn begin_stop(&mut self, name: &str) -> Result<bool, SupervisorError> {
        let Some(list) = self.handles.get_mut(name) else {
            return Err(SupervisorError::UnknownProcess(name.to_string()));
        };

        let mut any_live = false;
        for handle in list.iter_mut() {
            match handle.state {
                ProcessState::Running => {
                    handle.stopping = true;
                    any_live = true;
                    Self::signal_stop(handle);
                }
                ProcessState::Restarting => {
                    // Cancel the pending respawn
                    handle.generation += 1;
                    handle.state = ProcessState::Stopped;
                    debug!(app = %name, instance = handle.instance, "Cancelled pending restart");
                }
                ProcessState::Stopped | ProcessState::Failed => {}
            }
        }

        if any_live {
            info!(app = %name, grace = ?self.grace_timeout, "Stopping");
            let event_tx = self.event_tx.clone();
            let grace = self.grace_timeout;
            let name = name.to_string();
            tokio::spawn(async move {
                sleep(grace).await;
                let _ = event_tx.send(Event::GraceExpired { name }).await;
            });
        }

        Ok(any_live)
    }

    /// Delivers the termination signal for one running handle,
    /// escalating straight to force-kill if delivery fails.
    fn signal_stop(handle: &mut Handle) {
        #[cfg(unix)]
        if let Some(pid) = handle.pid {
            match send_term(pid) {
                Ok(()) => {
                    debug!(app = %handle.spec.name, instance = handle.instance, pid, "Sent SIGTERM");
                    return;
                }
                Err(err) => {
                    warn!(
                        app = %handle.spec.name,
                        instance = handle.instance,
                        %err,
                        "Escalating to force kill"
                    );
                }
            }
        }

        // No graceful path (non-unix, no pid, or delivery failure)
        if let Some(kill_tx) = handle.kill_tx.take() {
            let _ = kill_tx.send(());
        }
    }

    fn begin_shutdown(&mut self, ack: Option<oneshot::Sender<()>>) {
        if self.shutting_down {
            if let Some(ack) = ack {
                let _ = ack.send(());
            }
            return;
        }
        info!("Supervisor shutting down");
        self.shutting_down = true;
        self.shutdown_ack = ack;

        let names: Vec<String> = self.handles.keys().cloned().collect();
        for name in names {
            let _ = self.begin_stop(&name);
        }
        self.publish();
        self.maybe_finish_shutdown();
    }

    fn on_exited(&mut self, name: &str, instance: u32, generation: u64, exit_code: Option<i32>) {
        let Some(handle) = Self::find_handle(&mut self.handles, name, instance) else {
            return;
        };
        if handle.generation != generation {
            return; // stale waiter from an earlier spawn
        }

        handle.pid = None;
        handle.kill_tx = None;
        handle.last_exit_code = exit_code;
        let uptime = handle.started_at.take().map(|t| t.elapsed());

        if handle.stopping {
            handle.stopping = false;
            handle.state = ProcessState::Stopped;
            info!(app = %name, instance, ?exit_code, "Process stopped");
        } else {
            warn!(app = %name, instance, ?exit_code, "Process exited unexpectedly");
            if uptime.is_some_and(|u| u >= self.policy.stable_uptime) {
                handle.restart_count = 0;
            }
            if handle.spec.autorestart {
                handle.state = ProcessState::Failed;
                Self::schedule_restart(&self.policy, &self.event_tx, handle);
            } else {
                handle.state = ProcessState::Stopped;
            }
        }

        self.publish();
        self.on_handle_settled(name);
    }

    fn on_restart_due(&mut self, name: &str, instance: u32, generation: u64) {
        let policy = self.policy;
        let event_tx = self.event_tx.clone();
        let Some(handle) = Self::find_handle(&mut self.handles, name, instance) else {
            return;
        };
        if handle.generation != generation || handle.state != ProcessState::Restarting {
            return; // restart was cancelled in the meantime
        }

        let _ = Self::spawn_handle(&policy, &event_tx, handle);
        self.publish();
    }

    fn on_grace_expired(&mut self, name: &str) {
        let Some(list) = self.handles.get_mut(name) else {
            return;
        };
        for handle in list.iter_mut() {
            if handle.stopping && handle.state == ProcessState::Running {
                warn!(app = %name, instance = handle.instance, "Grace timeout expired, force killing");
                if let Some(kill_tx) = handle.kill_tx.take() {
                    let _ = kill_tx.send(());
                }
            }
        }
    }

    /// Runs completion logic once a handle has reached a terminal
    /// state: acknowledges pending stops, performs pending restarts,
    /// and finishes shutdown when nothing is live anymore.
    fn on_handle_settled(&mut self, name: &str) {
        let all_settled = self
            .handles
            .get(name)
            .is_none_or(|list| !list.iter().any(Handle::is_live));
        if !all_settled {
            return;
        }

        if let Some(acks) = self.pending_stops.remove(name) {
            for ack in acks {
                let _ = ack.send(Ok(()));
            }
        }
        if let Some(acks) = self.pending_restarts.remove(name) {
            // One respawn serves every caller waiting on this app
            let result = self.respawn_app(name);
            for ack in acks {
                let _ = ack.send(result.clone());
            }
        }

        self.maybe_finish_shutdown();
    }

    fn maybe_finish_shutdown(&mut self) {
        if !self.shutting_down {
            return;
        }
        let any_live = self.handles.values().flatten().any(Handle::is_live);
        if any_live {
            return;
        }
        if let Some(ack) = self.shutdown_ack.take() {
            let _ = ack.send(());
        }
        self.running = false;
    }

    fn find_handle<'a>(
        handles: &'a mut HashMap<String, Vec<Handle>>,
        name: &str,
        instance: u32,
    ) -> Option<&'a mut Handle> {
        handles
            .get_mut(name)?
            .iter_mut()
            .find(|h| h.instance == instance)
    }

    /// Spawns the OS process for one handle and wires up its waiter.
    /// On failure the handle is marked Failed and, under autorestart,
    /// a retry is scheduled.
    fn spawn_handle(
        policy: &RestartPolicy,
        event_tx: &mpsc::Sender<Event>,
        handle: &mut Handle,
    ) -> Result<(), SpawnError> {
        match spawn::spawn_instance(&handle.spec, handle.instance) {
            Ok(mut child) => {
                handle.generation += 1;
                handle.pid = child.id();
                handle.state = ProcessState::Running;
                handle.started_at = Some(Instant::now());
                handle.stopping = false;

                let (kill_tx, kill_rx) = oneshot::channel();
                handle.kill_tx = Some(kill_tx);

                Self::forward_output(&handle.spec.name, handle.instance, &mut child);
                Self::spawn_waiter(
                    event_tx.clone(),
                    handle.spec.name.clone(),
                    handle.instance,
                    handle.generation,
                    child,
                    kill_rx,
                );

                info!(
                    app = %handle.spec.name,
                    instance = handle.instance,
                    pid = handle.pid,
                    "Process started"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    app = %handle.spec.name,
                    instance = handle.instance,
                    %err,
                    "Spawn failed"
                );
                handle.pid = None;
                handle.state = ProcessState::Failed;
                if handle.spec.autorestart {
                    Self::schedule_restart(policy, event_tx, handle);
                }
                Err(err)
            }
        }
    }

    /// Moves a handle into Restarting and arms the backoff timer, or
    /// leaves it Failed when the restart limit is exhausted.
    fn schedule_restart(
        policy: &RestartPolicy,
        event_tx: &mpsc::Sender<Event>,
        handle: &mut Handle,
    ) {
        match policy.delay_for(handle.restart_count) {
            Some(delay) => {
                handle.state = ProcessState::Restarting;
                handle.restart_count += 1;
                info!(
                    app = %handle.spec.name,
                    instance = handle.instance,
                    restart = handle.restart_count,
                    ?delay,
                    "Restart scheduled"
                );

                let event_tx = event_tx.clone();
                let name = handle.spec.name.clone();
                let instance = handle.instance;
                let generation = handle.generation;
                tokio::spawn(async move {
                    sleep(delay).await;
                    let _ = event_tx
                        .send(Event::RestartDue {
                            name,
                            instance,
                            generation,
                        })
                        .await;
                });
            }
            None => {
                handle.state = ProcessState::Failed;
                error!(
                    app = %handle.spec.name,
                    instance = handle.instance,
                    restarts = handle.restart_count,
                    "Restart limit exhausted, giving up"
                );
            }
        }
    }

    /// Forwards child stdout/stderr line-by-line into the log.
    fn forward_output(name: &str, instance: u32, child: &mut Child) {
        if let Some(stdout) = child.stdout.take() {
            let name = name.to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    info!(app = %name, instance, "{line}");
                }
            });
        }
        if let Some(stderr) = child.stderr.take() {
            let name = name.to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!(app = %name, instance, "{line}");
                }
            });
        }
    }

    /// Waiter task: owns the child, reports its exit, and force-kills
    /// it when told to.
    fn spawn_waiter(
        event_tx: mpsc::Sender<Event>,
        name: String,
        instance: u32,
        generation: u64,
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
    ) {
        tokio::spawn(async move {
            let status = tokio::select! {
                status = child.wait() => status,
                requested = kill_rx => {
                    if requested.is_ok() {
                        if let Err(err) = child.kill().await {
                            warn!(app = %name, instance, %err, "Force kill failed");
                        }
                    }
                    child.wait().await
                }
            };

            let exit_code = status.ok().and_then(|s| s.code());
            let _ = event_tx
                .send(Event::Exited {
                    name,
                    instance,
                    generation,
                    exit_code,
                })
                .await;
        });
    }

    /// Publishes a fresh snapshot table. Readers never block on the
    /// coordinator; they only take this lock.
    fn publish(&self) {
        let mut all: Vec<HandleSnapshot> = self
            .handles
            .values()
            .flatten()
            .map(Handle::snapshot)
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.instance.cmp(&b.instance)));

        if let Ok(mut guard) = self.snapshots.write() {
            *guard = all;
        }
    }
}

/// Sends SIGTERM to a process. A process that is already gone counts
/// as success.
#[cfg(unix)]
fn send_term(pid: u32) -> Result<(), SignalError> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) | Err(nix::errno::Errno::ESRCH) => Ok(()),
        Err(err) => Err(SignalError::Deliver {
            pid,
            message: err.to_string(),
        }),
    }
}
