//! Store-to-session translation layer.
//!
//! The [`StoreBridge`] executes the store-touching [`AppAction`]s against a
//! [`Store`] and converts the outcomes into [`AppEvent`]s for the session.
//!
//! # Responsibilities
//!
//! - Runs the multi-step operations: registration is append then lookup,
//!   publishing is append then list.
//! - Classifies failures: a lookup miss is routine, a decode failure means the
//!   store is corrupt, everything else is a recoverable outage.
//! - Logs failures once, here, with the typed error in hand.

use murmur_store::{Post, PublicKey, Store, StoreError};

use crate::{AppAction, AppEvent};

/// Bridge between the session and the shared store.
///
/// Cloning is cheap and clones share the underlying store. Calls block on
/// store locks, so async callers run them on a blocking thread.
#[derive(Clone)]
pub struct StoreBridge<S: Store> {
    store: S,
}

impl<S: Store> StoreBridge<S> {
    /// Create a bridge over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Execute a store action and return the resulting session events.
    ///
    /// Non-store actions produce no events.
    pub fn process_app_action(&self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::LookupUser { key } => vec![self.lookup(&key)],
            AppAction::Register { key, name } => vec![self.register(&key, &name)],
            AppAction::ListPosts => vec![self.list_posts()],
            AppAction::PublishPost { post } => self.publish(post),
            AppAction::Render | AppAction::Quit => Vec::new(),
        }
    }

    fn lookup(&self, key: &[u8]) -> AppEvent {
        match self.store.lookup_user(key) {
            Ok(user) => AppEvent::UserResolved(user),
            Err(StoreError::NotFound) => AppEvent::UserUnknown,
            Err(e) => {
                log_store_error(&e, "identity lookup failed", key);
                AppEvent::LookupFailed { message: e.to_string() }
            },
        }
    }

    fn register(&self, key: &[u8], name: &str) -> AppEvent {
        let result = self.store.add_user(key, name).and_then(|_| self.store.lookup_user(key));

        match result {
            Ok(user) => AppEvent::RegistrationCompleted { user },
            Err(e) => {
                log_store_error(&e, "registration failed", key);
                AppEvent::RegistrationFailed { message: e.to_string() }
            },
        }
    }

    fn list_posts(&self) -> AppEvent {
        match self.store.list_posts() {
            Ok(posts) => AppEvent::PostsLoaded(posts),
            Err(e) => {
                tracing::warn!(error = %e, "feed fetch failed");
                AppEvent::PostsFetchFailed { message: e.to_string() }
            },
        }
    }

    fn publish(&self, post: Post) -> Vec<AppEvent> {
        if let Err(e) = self.store.add_post(post) {
            tracing::warn!(error = %e, "post failed, draft dropped");
            return vec![AppEvent::PostFailed { message: e.to_string() }];
        }

        vec![self.list_posts()]
    }
}

/// Log a failed identity operation without exposing key bytes.
fn log_store_error(error: &StoreError, context: &str, key: &[u8]) {
    let fingerprint =
        PublicKey::decode(key).map_or_else(|_| "<undecodable>".to_string(), |k| k.fingerprint());

    match error {
        StoreError::Decode(_) => tracing::error!(%error, %fingerprint, "{context}"),
        _ => tracing::warn!(%error, %fingerprint, "{context}"),
    }
}
