//! Shared identity and feed store.
//!
//! One store instance lives for the whole server process and is shared by
//! every session. It maps public keys to [`User`] records and holds the
//! append-only [`Post`] feed.
//!
//! # Components
//!
//! - [`Store`]: trait exposing the four store operations
//! - [`MemoryStore`]: in-process implementation, one lock per sequence
//! - [`ChaoticStore`]: fault-injecting wrapper for failure-path testing
//! - [`PublicKey`]: encoding-insensitive Ed25519 identity key

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chaotic;
mod error;
mod key;
mod memory;
mod model;

pub use chaotic::{ChaoticStore, StoreOperation};
pub use error::StoreError;
pub use key::{ED25519_ALGORITHM, KeyError, PublicKey};
pub use memory::MemoryStore;
pub use model::{Post, User};

/// Storage abstraction for users and posts.
///
/// Must be Clone (every session holds a handle), Send + Sync, and synchronous.
/// Implementations share state internally, so clones see the same data. Each
/// call is a critical section: concurrent appends never interleave and a
/// lookup sees either the state before or after a concurrent append.
pub trait Store: Clone + Send + Sync + 'static {
    /// Find the user whose stored key decodes to the same key as `key`.
    ///
    /// Returns [`StoreError::NotFound`] on a miss and [`StoreError::Decode`]
    /// if `key` or any scanned record's key cannot be decoded.
    fn lookup_user(&self, key: &[u8]) -> Result<User, StoreError>;

    /// Append a user record.
    ///
    /// Names are not checked for uniqueness. Returns the created record.
    fn add_user(&self, key: &[u8], name: &str) -> Result<User, StoreError>;

    /// All posts, oldest first.
    fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Append a post to the feed.
    fn add_post(&self, post: Post) -> Result<(), StoreError>;
}
