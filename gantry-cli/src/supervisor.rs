//! Interactive process supervision for the dev runner.
//!
//! The supervisor owns a single child slot and drives it from an injected
//! keystroke stream, so the command loop is testable with a scripted
//! sequence of keys and a fake spawner.

use std::io::Write;
use std::process::Stdio;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use log::{debug, info, warn};

use crate::console::Console;
use crate::entry::LaunchPlan;
use crate::error::SupervisorError;

/// Handle to a spawned child process.
#[async_trait]
pub trait ChildHandle: Send {
    /// OS process id, while the process is alive.
    fn id(&self) -> Option<u32>;

    /// Kill the process and wait for it to exit.
    async fn kill(&mut self) -> std::io::Result<()>;
}

/// Spawns child processes from a launch plan.
#[async_trait]
pub trait Spawner: Send + Sync {
    async fn spawn(&self, plan: &LaunchPlan) -> std::io::Result<Box<dyn ChildHandle>>;
}

/// Real spawner over tokio's process API with fully inherited stdio: the
/// child's streams are the operator's terminal.
pub struct TokioSpawner;

#[async_trait]
impl Spawner for TokioSpawner {
    async fn spawn(&self, plan: &LaunchPlan) -> std::io::Result<Box<dyn ChildHandle>> {
        let mut command = tokio::process::Command::new(&plan.program);
        command
            .args(&plan.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (key, value) in &plan.env {
            command.env(key, value);
        }
        let child = command.spawn()?;
        Ok(Box::new(TokioChild { child }))
    }
}

struct TokioChild {
    child: tokio::process::Child,
}

#[async_trait]
impl ChildHandle for TokioChild {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill().await
    }
}

/// Lifecycle of the single child slot.
///
/// A reload transitions Running → Stopping → Starting → Running; the prior
/// handle is killed and awaited before the replacement spawns, so two spawns
/// can never race.
pub enum ChildSlot {
    /// No child and none in flight.
    Idle,
    /// A spawn is in flight.
    Starting,
    /// A child is alive.
    Running(Box<dyn ChildHandle>),
    /// The child is being killed.
    Stopping,
}

impl ChildSlot {
    /// Whether a child is currently alive.
    pub fn is_running(&self) -> bool {
        matches!(self, ChildSlot::Running(_))
    }

    fn state_name(&self) -> &'static str {
        match self {
            ChildSlot::Idle => "idle",
            ChildSlot::Starting => "starting",
            ChildSlot::Running(_) => "running",
            ChildSlot::Stopping => "stopping",
        }
    }
}

/// Single-keystroke operator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `r` - restart the child with identical arguments.
    Reload,
    /// `q` - quit after confirmation.
    Quit,
    /// ctrl+c - quit without confirmation.
    ForceQuit,
    /// `c` - clear the screen.
    Clear,
    /// `i` - print version information.
    Info,
    /// Anything else.
    Unknown(char),
}

impl Command {
    /// Map a keystroke to its command.
    pub fn from_key(key: char) -> Self {
        match key {
            'r' => Command::Reload,
            'q' => Command::Quit,
            '\x03' => Command::ForceQuit,
            'c' => Command::Clear,
            'i' => Command::Info,
            other => Command::Unknown(other),
        }
    }
}

/// Why the command loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The operator quit; the supervisor exits with status 0.
    Quit,
    /// The keystroke stream closed.
    InputClosed,
}

/// Runs the application as a child process and manages its lifecycle from
/// operator keystrokes.
pub struct Supervisor<S: Spawner, W: Write> {
    spawner: S,
    console: Console<W>,
    plan: LaunchPlan,
    slot: ChildSlot,
}

impl<S: Spawner, W: Write> Supervisor<S, W> {
    pub fn new(spawner: S, console: Console<W>, plan: LaunchPlan) -> Self {
        Self {
            spawner,
            console,
            plan,
            slot: ChildSlot::Idle,
        }
    }

    /// Current child slot state.
    pub fn slot(&self) -> &ChildSlot {
        &self.slot
    }

    /// Borrow the console (tests inspect captured output through this).
    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    /// Spawn the first child and drive the command loop until quit or the
    /// keystroke stream closes. The child is killed before returning.
    pub async fn run<K>(&mut self, mut keys: K) -> Result<Exit, SupervisorError>
    where
        K: Stream<Item = char> + Unpin,
    {
        self.start().await?;
        while let Some(key) = keys.next().await {
            match Command::from_key(key) {
                Command::Reload => self.reload().await?,
                Command::Quit => {
                    if self.confirm_quit(&mut keys).await? {
                        self.shutdown().await?;
                        return Ok(Exit::Quit);
                    }
                }
                Command::ForceQuit => {
                    self.shutdown().await?;
                    return Ok(Exit::Quit);
                }
                Command::Clear => self.console.clear()?,
                Command::Info => self.console.version()?,
                Command::Unknown(key) => {
                    self.console.warn(&format!("unknown input '{key}'"))?;
                    self.console.banner()?;
                }
            }
        }
        self.shutdown().await?;
        Ok(Exit::InputClosed)
    }

    async fn start(&mut self) -> Result<(), SupervisorError> {
        self.slot = ChildSlot::Starting;
        match self.spawner.spawn(&self.plan).await {
            Ok(handle) => {
                info!(
                    "application started (pid {:?}): {} {}",
                    handle.id(),
                    self.plan.program,
                    self.plan.args.join(" ")
                );
                self.slot = ChildSlot::Running(handle);
                Ok(())
            }
            Err(err) => {
                self.slot = ChildSlot::Idle;
                self.console
                    .error(&format!("failed to start application: {err}"))?;
                Err(SupervisorError::Spawn(err))
            }
        }
    }

    async fn reload(&mut self) -> Result<(), SupervisorError> {
        if !self.slot.is_running() {
            warn!("reload rejected in state {}", self.slot.state_name());
            self.console.warn("no running application to restart")?;
            return Ok(());
        }
        self.console.clear()?;
        self.console.success("restarting application...")?;
        self.stop().await?;
        self.start().await
    }

    async fn confirm_quit<K>(&mut self, keys: &mut K) -> Result<bool, SupervisorError>
    where
        K: Stream<Item = char> + Unpin,
    {
        self.console.prompt("quit the dev server? [y/n] ")?;
        match keys.next().await {
            // `q` doubles as confirmation, so a typed "qq" also quits.
            Some('y') | Some('q') | None => Ok(true),
            Some(_) => {
                self.console.info("cancelled")?;
                Ok(false)
            }
        }
    }

    async fn stop(&mut self) -> Result<(), SupervisorError> {
        if let ChildSlot::Running(mut handle) =
            std::mem::replace(&mut self.slot, ChildSlot::Stopping)
        {
            let pid = handle.id();
            handle.kill().await?;
            debug!("application stopped (pid {pid:?})");
        }
        self.slot = ChildSlot::Idle;
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), SupervisorError> {
        self.stop().await?;
        info!("dev server shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SpawnEvent {
        Spawned(usize),
        Killed(usize),
    }

    #[derive(Default)]
    struct Recording {
        events: Mutex<Vec<SpawnEvent>>,
        next_id: AtomicUsize,
        fail_spawn: bool,
    }

    struct FakeSpawner(Arc<Recording>);

    struct FakeChild {
        id: usize,
        recording: Arc<Recording>,
    }

    #[async_trait]
    impl Spawner for FakeSpawner {
        async fn spawn(&self, _plan: &LaunchPlan) -> std::io::Result<Box<dyn ChildHandle>> {
            if self.0.fail_spawn {
                return Err(std::io::Error::other("spawn refused"));
            }
            let id = self.0.next_id.fetch_add(1, Ordering::SeqCst);
            self.0.events.lock().unwrap().push(SpawnEvent::Spawned(id));
            Ok(Box::new(FakeChild {
                id,
                recording: Arc::clone(&self.0),
            }))
        }
    }

    #[async_trait]
    impl ChildHandle for FakeChild {
        fn id(&self) -> Option<u32> {
            Some(self.id as u32)
        }

        async fn kill(&mut self) -> std::io::Result<()> {
            self.recording
                .events
                .lock()
                .unwrap()
                .push(SpawnEvent::Killed(self.id));
            Ok(())
        }
    }

    fn supervisor(recording: &Arc<Recording>) -> Supervisor<FakeSpawner, Vec<u8>> {
        Supervisor::new(
            FakeSpawner(Arc::clone(recording)),
            Console::new(Vec::new()),
            LaunchPlan::for_entry(std::path::Path::new("src/main.rs")),
        )
    }

    #[tokio::test]
    async fn test_start_transitions_to_running() {
        let recording = Arc::new(Recording::default());
        let mut sup = supervisor(&recording);
        sup.start().await.unwrap();
        assert!(sup.slot().is_running());
        assert_eq!(
            *recording.events.lock().unwrap(),
            vec![SpawnEvent::Spawned(0)]
        );
    }

    #[tokio::test]
    async fn test_reload_kills_before_respawning() {
        let recording = Arc::new(Recording::default());
        let mut sup = supervisor(&recording);
        sup.start().await.unwrap();
        sup.reload().await.unwrap();
        assert!(sup.slot().is_running());
        assert_eq!(
            *recording.events.lock().unwrap(),
            vec![
                SpawnEvent::Spawned(0),
                SpawnEvent::Killed(0),
                SpawnEvent::Spawned(1),
            ]
        );
    }

    #[tokio::test]
    async fn test_reload_rejected_while_idle() {
        let recording = Arc::new(Recording::default());
        let mut sup = supervisor(&recording);
        sup.reload().await.unwrap();
        assert!(!sup.slot().is_running());
        assert!(recording.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_failure_surfaces_error() {
        let recording = Arc::new(Recording {
            fail_spawn: true,
            ..Recording::default()
        });
        let mut sup = supervisor(&recording);
        let err = sup.start().await.unwrap_err();
        assert!(matches!(err, SupervisorError::Spawn(_)));
        assert!(!sup.slot().is_running());
    }

    #[test]
    fn test_command_from_key() {
        assert_eq!(Command::from_key('r'), Command::Reload);
        assert_eq!(Command::from_key('q'), Command::Quit);
        assert_eq!(Command::from_key('c'), Command::Clear);
        assert_eq!(Command::from_key('i'), Command::Info);
        assert_eq!(Command::from_key('\x03'), Command::ForceQuit);
        assert_eq!(Command::from_key('x'), Command::Unknown('x'));
    }
}
