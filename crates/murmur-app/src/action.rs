//! Session side-effects and intents.
//!
//! This module defines the [`AppAction`] enum: instructions produced by the
//! [`crate::Session`] state machine for the runtime to execute.

use murmur_store::Post;

/// Actions produced by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the session.
    Render,

    /// End the session.
    Quit,

    /// Resolve the connecting key to a user.
    LookupUser {
        /// Key bytes as supplied by the transport.
        key: Vec<u8>,
    },

    /// Store a new user, then read back its canonical record.
    Register {
        /// Key bytes as supplied by the transport.
        key: Vec<u8>,
        /// Chosen display name.
        name: String,
    },

    /// Fetch the whole feed.
    ListPosts,

    /// Append a post, then fetch the feed.
    PublishPost {
        /// Post to append.
        post: Post,
    },
}
