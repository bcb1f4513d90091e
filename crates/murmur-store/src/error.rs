//! Store error types.

use thiserror::Error;

use crate::KeyError;

/// Errors returned by [`crate::Store`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No user is registered for the key.
    ///
    /// Expected for first-time connections; callers route to signup.
    #[error("unknown user")]
    NotFound,

    /// A key could not be decoded.
    ///
    /// For a stored record this means the store is corrupt; the lookup fails
    /// closed instead of reporting a miss.
    #[error("key decode failed: {0}")]
    Decode(#[from] KeyError),

    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(&'static str),

    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
