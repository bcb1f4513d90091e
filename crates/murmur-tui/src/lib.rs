//! Terminal UI for murmur
//!
//! A thin shell over [`murmur_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`murmur_app::Runtime`]
//! and the session host in [`murmur_server::Server`].
//!
//! This crate only handles terminal input and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use murmur_app::{AppEvent, Driver, KeyInput, Session};
pub use terminal::{TerminalDriver, TerminalError};
