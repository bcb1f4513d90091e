//! Stored records.

use chrono::{DateTime, Utc};

use crate::{KeyError, PublicKey};

/// A registered identity.
///
/// Identity is the public key; `name` is a display name and is not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Display name chosen at signup.
    pub name: String,
    /// Key bytes as supplied at registration.
    pub public_key: Vec<u8>,
}

impl User {
    /// Create a user record.
    pub fn new(name: impl Into<String>, public_key: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), public_key: public_key.into() }
    }

    /// Decode the stored key bytes.
    pub fn key(&self) -> Result<PublicKey, KeyError> {
        PublicKey::decode(&self.public_key)
    }
}

/// A feed entry.
///
/// `author` is a copy of the posting user's name at the time of posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Author display name.
    pub author: String,
    /// Post text, possibly multi-line.
    pub body: String,
    /// When the post was submitted.
    pub published_at: DateTime<Utc>,
}

impl Post {
    /// Create a post stamped with the current time.
    pub fn now(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self { author: author.into(), body: body.into(), published_at: Utc::now() }
    }
}
