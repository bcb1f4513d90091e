//! Generic runtime for session orchestration.
//!
//! The Runtime drives one connection's event loop, coordinating between:
//! - [`Session`]: screen state machine
//! - [`StoreBridge`]: store operations
//! - [`Driver`]: transport input and rendering
//!
//! Store actions never block the loop. They are queued to a per-session
//! worker that runs them one at a time on tokio's blocking pool and posts the
//! resulting events back through a channel. Running them in order keeps a
//! stale feed listing from overtaking a newer one.

use murmur_store::Store;
use tokio::sync::mpsc;

use crate::{AppAction, AppEvent, Driver, Session, SessionParams, StoreBridge};

/// Generic runtime that orchestrates Session, StoreBridge and Driver.
///
/// # Type Parameters
///
/// - `D`: Transport and renderer
/// - `S`: Shared store
pub struct Runtime<D, S>
where
    D: Driver,
    S: Store,
{
    driver: D,
    session: Session,
    bridge: StoreBridge<S>,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: Store,
{
    /// Create a runtime for one connection.
    pub fn new(driver: D, store: S, params: SessionParams) -> Self {
        Self { driver, session: Session::new(params), bridge: StoreBridge::new(store) }
    }

    /// Run the event loop until a quit key or the transport closes.
    ///
    /// Input is polled with priority over store completions, so a quit key
    /// supersedes results that are already waiting. Results that arrive after
    /// the loop ends are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to read input or render.
    pub async fn run(mut self) -> Result<Session, D::Error> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        tokio::spawn(store_worker(self.bridge.clone(), action_rx, event_tx));

        let actions = self.session.init();
        let result = self.process_actions(actions, &action_tx);

        let result = match result {
            Ok(false) => self.event_loop(&action_tx, &mut event_rx).await,
            other => other.map(|_| ()),
        };

        self.driver.stop();
        result.map(|()| self.session)
    }

    async fn event_loop(
        &mut self,
        action_tx: &mpsc::UnboundedSender<AppAction>,
        event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    ) -> Result<(), D::Error> {
        loop {
            let event = tokio::select! {
                biased;

                input = self.driver.poll_event() => match input? {
                    Some(event) => event,
                    None => {
                        tracing::debug!("transport closed");
                        return Ok(());
                    },
                },

                Some(event) = event_rx.recv() => event,
            };

            let actions = self.session.handle(event);
            if self.process_actions(actions, action_tx)? {
                return Ok(());
            }
        }
    }

    /// Execute actions returned by the session.
    ///
    /// Returns `true` if the session should end.
    fn process_actions(
        &mut self,
        actions: Vec<AppAction>,
        action_tx: &mpsc::UnboundedSender<AppAction>,
    ) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.session)?,
                AppAction::Quit => return Ok(true),
                AppAction::LookupUser { .. }
                | AppAction::Register { .. }
                | AppAction::ListPosts
                | AppAction::PublishPost { .. } => {
                    if action_tx.send(action).is_err() {
                        tracing::warn!("store worker stopped, dropping action");
                    }
                },
            }
        }
        Ok(false)
    }
}

/// Run queued store actions in order until the session goes away.
async fn store_worker<S: Store>(
    bridge: StoreBridge<S>,
    mut actions: mpsc::UnboundedReceiver<AppAction>,
    events: mpsc::UnboundedSender<AppEvent>,
) {
    while let Some(action) = actions.recv().await {
        // Session ended while this action was queued
        if events.is_closed() {
            tracing::debug!(?action, "session closed, skipping store action");
            continue;
        }

        let bridge = bridge.clone();
        let results = match tokio::task::spawn_blocking(move || bridge.process_app_action(action))
            .await
        {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, "store task failed");
                continue;
            },
        };

        for event in results {
            if events.send(event).is_err() {
                tracing::debug!("session closed, dropping store result");
            }
        }
    }
}
