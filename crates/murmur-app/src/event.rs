//! Session input events.
//!
//! This module defines [`AppEvent`], the full set of inputs that drive the
//! [`crate::Session`] state machine.
//!
//! Events originate from two distinct sources:
//! - The transport: key presses and window resizes.
//! - Completed store operations, translated by [`crate::StoreBridge`].

use murmur_store::{Post, User};

use crate::KeyInput;

/// Events processed by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Window resize (columns, rows).
    Resize(u16, u16),

    /// Identity lookup found a registered user.
    UserResolved(User),

    /// Identity lookup found no user for the key.
    UserUnknown,

    /// Identity lookup failed for a reason other than a miss.
    LookupFailed {
        /// Error description.
        message: String,
    },

    /// Signup stored the user and read back its canonical record.
    RegistrationCompleted {
        /// The registered user.
        user: User,
    },

    /// Signup could not store or read back the user.
    RegistrationFailed {
        /// Error description.
        message: String,
    },

    /// Fresh copy of the feed, oldest first.
    PostsLoaded(Vec<Post>),

    /// Listing the feed failed.
    PostsFetchFailed {
        /// Error description.
        message: String,
    },

    /// Appending a post failed.
    PostFailed {
        /// Error description.
        message: String,
    },
}
