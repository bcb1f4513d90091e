//! Deterministic simulation harness for murmur sessions.
//!
//! Runs the production [`murmur_app::Runtime`] against a scripted
//! [`SimDriver`] so end-to-end behavior can be tested without a terminal.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the session
//! invariants.
//!
//! # Fixtures
//!
//! The `fixtures` module derives Ed25519 keys from one-byte seeds and provides
//! a malformed key for store corruption tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod invariants;
pub mod sim_driver;

use murmur_app::{Runtime, Session, SessionParams};
use murmur_store::Store;

pub use invariants::{
    FeedAppendOnly, FeedAuthorIsUser, Invariant, InvariantRegistry, InvariantResult,
    MonotonicState, ScreenMatchesState, ScreenSnapshot, SessionSnapshot, Violation,
};
pub use sim_driver::{DEFAULT_STALL_TIMEOUT, Script, SimDriver, SimDriverError, SimHandle};

/// Outcome of a simulated session.
pub struct SimOutcome {
    /// Runtime result: the final session, or the driver error that ended it.
    pub result: Result<Session, SimDriverError>,
    /// Captured renders.
    pub handle: SimHandle,
}

impl SimOutcome {
    /// Last render. `None` if nothing was rendered.
    pub fn last_render(&self) -> Option<SessionSnapshot> {
        self.handle.last_render()
    }
}

/// Run one session for `key` against `store`, playing `script`.
///
/// Standard invariants are checked on every render.
pub async fn simulate<S: Store>(store: S, key: Vec<u8>, script: Script) -> SimOutcome {
    let driver = SimDriver::new(script).with_invariants(InvariantRegistry::standard());
    let handle = driver.handle();

    let result = Runtime::new(driver, store, SessionParams::new(key)).run().await;
    SimOutcome { result, handle }
}
