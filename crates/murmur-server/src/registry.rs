//! Registry of hosted sessions.
//!
//! Sessions are keyed by an id the registry allocates. Ids are never reused
//! within a process, so a log line naming a session id is unambiguous.

use std::{collections::HashMap, time::SystemTime};

use crate::ServerError;

/// Information about a hosted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Fingerprint of the connecting key, or a placeholder if it did not
    /// decode.
    pub fingerprint: String,
    /// When the connection was accepted.
    pub started_at: SystemTime,
}

impl SessionInfo {
    /// Info for a session starting now.
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self { fingerprint: fingerprint.into(), started_at: SystemTime::now() }
    }
}

/// Bounded map of session id to [`SessionInfo`].
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<u64, SessionInfo>,
    next_id: u64,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create an empty registry admitting at most `max_sessions`.
    pub fn new(max_sessions: usize) -> Self {
        Self { sessions: HashMap::new(), next_id: 1, max_sessions }
    }

    /// Register a session and return its id.
    ///
    /// Fails with [`ServerError::SessionLimit`] when full.
    pub fn register(&mut self, info: SessionInfo) -> Result<u64, ServerError> {
        if self.sessions.len() >= self.max_sessions {
            return Err(ServerError::SessionLimit { max: self.max_sessions });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(id, info);
        Ok(id)
    }

    /// Remove a session. `None` if it was not registered.
    pub fn unregister(&mut self, id: u64) -> Option<SessionInfo> {
        self.sessions.remove(&id)
    }

    /// Number of hosted sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no sessions are hosted.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
