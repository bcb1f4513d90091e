//! Session layer for murmur
//!
//! Pure state machines and a generic runtime for one connection, enabling
//! deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`Session`]: root state machine (identity lookup, screen swaps, quit)
//! - [`SignupScreen`] and [`FeedScreen`]: the two screens a session activates
//! - [`StoreBridge`]: executes store actions and translates results to events
//! - [`Driver`]: trait for transport and renderer abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod driver;
mod event;
mod feed;
mod form;
mod input;
mod runtime;
mod session;
mod signup;

pub use action::AppAction;
pub use bridge::StoreBridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use feed::{COMPOSE_KEY, COMPOSE_TITLE, FeedMode, FeedScreen};
pub use form::{FormOutcome, REQUIRED_MESSAGE, TextForm};
pub use input::KeyInput;
pub use runtime::Runtime;
pub use session::{DEFAULT_BANNER, DEFAULT_SIZE, Screen, Session, SessionParams, SessionState};
pub use signup::{NAME_TITLE, SignupScreen, SignupState};
