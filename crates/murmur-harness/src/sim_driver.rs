//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`murmur_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input comes from a [`Script`]. Wait steps hold back further input until the
//! last render satisfies a condition, which lets a test type into a screen only
//! after the store has answered. Every render is captured as a
//! [`SessionSnapshot`] and, when a registry is attached, checked against the
//! invariants.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use murmur_app::{AppEvent, Driver, KeyInput, Session};

use crate::invariants::{InvariantRegistry, SessionSnapshot, Violation};

/// How long a wait step may go without its condition becoming true.
pub const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub enum SimDriverError {
    /// A wait step's condition never became true.
    Stalled {
        /// The wait step's description.
        waiting_for: String,
        /// Last render seen. `None` if nothing was rendered.
        last: Option<Box<SessionSnapshot>>,
    },
    /// A render broke one or more invariants.
    InvariantViolated(Vec<Violation>),
}

impl fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stalled { waiting_for, last } => {
                write!(f, "stalled waiting for {waiting_for}; last render: {last:?}")
            },
            Self::InvariantViolated(violations) => {
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                write!(f, "invariant violation:\n  {}", messages.join("\n  "))
            },
        }
    }
}

impl std::error::Error for SimDriverError {}

type Condition = Box<dyn Fn(&[SessionSnapshot]) -> bool + Send + Sync>;

/// One scripted step.
enum Step {
    /// Deliver an event.
    Input(AppEvent),
    /// Hold further input until the render history satisfies the condition.
    WaitFor { description: String, condition: Condition },
}

/// Scripted input for a [`SimDriver`].
///
/// The transport closes once the script is exhausted.
#[derive(Default)]
pub struct Script {
    steps: VecDeque<Step>,
}

impl Script {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an arbitrary event.
    #[must_use]
    pub fn event(mut self, event: AppEvent) -> Self {
        self.steps.push_back(Step::Input(event));
        self
    }

    /// Press a key.
    #[must_use]
    pub fn key(self, key: KeyInput) -> Self {
        self.event(AppEvent::Key(key))
    }

    /// Type each character of `text`.
    #[must_use]
    pub fn text(self, text: &str) -> Self {
        text.chars().fold(self, |script, c| script.key(KeyInput::Char(c)))
    }

    /// Press Enter.
    #[must_use]
    pub fn enter(self) -> Self {
        self.key(KeyInput::Enter)
    }

    /// Press `q`.
    #[must_use]
    pub fn quit(self) -> Self {
        self.key(KeyInput::Char('q'))
    }

    /// Resize the window.
    #[must_use]
    pub fn resize(self, columns: u16, rows: u16) -> Self {
        self.event(AppEvent::Resize(columns, rows))
    }

    /// Wait until the last render satisfies `condition`.
    ///
    /// The condition is re-checked whenever the runtime asks for input, which
    /// happens after every store result, so it may also observe state outside
    /// the session such as the store itself.
    #[must_use]
    pub fn wait_for(
        self,
        description: impl Into<String>,
        condition: impl Fn(&SessionSnapshot) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.wait_for_history(description, move |history| history.last().is_some_and(&condition))
    }

    /// Wait until at least `count` renders have happened.
    #[must_use]
    pub fn wait_for_renders(self, count: usize) -> Self {
        self.wait_for_history(format!("{count} renders"), move |history| history.len() >= count)
    }

    /// Wait until the full render history satisfies `condition`.
    #[must_use]
    pub fn wait_for_history(
        mut self,
        description: impl Into<String>,
        condition: impl Fn(&[SessionSnapshot]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.steps.push_back(Step::WaitFor {
            description: description.into(),
            condition: Box::new(condition),
        });
        self
    }

    /// Number of remaining steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the script is exhausted.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Shared state observable after the driver moves into a runtime.
#[derive(Default)]
struct SharedState {
    renders: Vec<SessionSnapshot>,
    stopped: bool,
}

/// Handle for inspecting a [`SimDriver`] from the test body.
#[derive(Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
}

impl SimHandle {
    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every render so far, oldest first.
    pub fn renders(&self) -> Vec<SessionSnapshot> {
        self.lock().renders.clone()
    }

    /// Most recent render. `None` if nothing was rendered.
    pub fn last_render(&self) -> Option<SessionSnapshot> {
        self.lock().renders.last().cloned()
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] so the same [`murmur_app::Runtime`] orchestration
/// code runs in both production and simulation tests.
pub struct SimDriver {
    script: VecDeque<Step>,
    handle: SimHandle,
    invariants: Option<InvariantRegistry>,
    stall_timeout: Duration,
}

impl SimDriver {
    /// Create a driver that plays `script`.
    pub fn new(script: Script) -> Self {
        Self {
            script: script.steps,
            handle: SimHandle { state: Arc::new(Mutex::new(SharedState::default())) },
            invariants: None,
            stall_timeout: DEFAULT_STALL_TIMEOUT,
        }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Override how long a wait step may stall.
    #[must_use]
    pub fn with_stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = timeout;
        self
    }

    /// Handle for inspecting renders after the driver is moved.
    pub fn handle(&self) -> SimHandle {
        self.handle.clone()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            let waiting_for = match self.script.front() {
                None => return Ok(None),
                Some(Step::Input(_)) => {
                    if let Some(Step::Input(event)) = self.script.pop_front() {
                        return Ok(Some(event));
                    }
                    continue;
                },
                Some(Step::WaitFor { description, condition }) => {
                    let ready = condition(&self.handle.lock().renders);
                    if ready {
                        self.script.pop_front();
                        continue;
                    }
                    description.clone()
                },
            };

            // Renders only happen between polls, so nothing can satisfy the
            // condition until this future is dropped for a store result.
            tokio::time::sleep(self.stall_timeout).await;
            tracing::warn!(%waiting_for, "script stalled");
            let last = self.handle.last_render().map(Box::new);
            return Err(SimDriverError::Stalled { waiting_for, last });
        }
    }

    fn render(&mut self, session: &Session) -> Result<(), Self::Error> {
        let mut state = self.handle.lock();
        state.renders.push(SessionSnapshot::from_session(session));

        if let Some(registry) = &self.invariants {
            registry.check_all(&state.renders).map_err(|violations| {
                tracing::warn!(count = violations.len(), "invariant violated");
                SimDriverError::InvariantViolated(violations)
            })?;
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.handle.lock().stopped = true;
    }
}
