//! Driver trait for abstracting session I/O.
//!
//! The [`Driver`] trait decouples the session runtime from a specific
//! transport. Each front end implements the trait to supply input and draw
//! the session, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{AppEvent, Session};

/// Abstracts the transport and renderer of one connection.
///
/// # Implementations
///
/// - **Terminal**: crossterm input and ratatui rendering on the local tty
/// - **Simulation**: scripted input and snapshot capture for tests
///
/// # Cancellation
///
/// The runtime races [`Driver::poll_event`] against store completions and
/// drops the losing future. Implementations must not lose input when the
/// future is dropped before it resolves.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` once the transport has closed.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Draw the session.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, session: &Session) -> Result<(), Self::Error>;

    /// Release transport resources. Called once when the loop ends.
    fn stop(&mut self);
}
