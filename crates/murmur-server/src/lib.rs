//! Murmur session host.
//!
//! Owns the single shared [`Store`] and hands each accepted connection its own
//! [`Runtime`]. The transport (terminal, SSH channel, simulation) supplies the
//! [`Driver`]; the host only tracks which sessions are alive and logs their
//! lifecycle.
//!
//! # Components
//!
//! - [`Server`]: spawns and awaits per-connection runtimes
//! - [`ServerConfig`]: TOML configuration with defaults for every field
//! - [`SessionRegistry`]: bounded id -> [`SessionInfo`] map

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod registry;

use std::sync::Arc;

pub use config::{LOG_LEVELS, ServerConfig};
pub use error::{ConfigError, ServerError};
use murmur_app::{Driver, Runtime, Session};
use murmur_store::{PublicKey, Store};
pub use registry::{SessionInfo, SessionRegistry};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::Instrument;

/// Fingerprint logged for keys that do not decode.
pub const UNDECODABLE_FINGERPRINT: &str = "<undecodable>";

/// What the transport knows about a connection when it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Connecting key, as presented by the transport.
    pub public_key: Vec<u8>,
    /// Window dimensions (columns, rows). `None` if the transport has no
    /// window yet.
    pub size: Option<(u16, u16)>,
}

impl Connection {
    /// A connection for `public_key` with no known window size.
    pub fn new(public_key: impl Into<Vec<u8>>) -> Self {
        Self { public_key: public_key.into(), size: None }
    }

    /// Set the window size reported by the transport.
    #[must_use]
    pub fn with_size(mut self, columns: u16, rows: u16) -> Self {
        self.size = Some((columns, rows));
        self
    }
}

/// Session host.
///
/// Cloning is cheap: clones share the store, configuration and registry.
pub struct Server<S: Store> {
    store: S,
    config: Arc<ServerConfig>,
    registry: Arc<Mutex<SessionRegistry>>,
}

impl<S: Store> Clone for Server<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: Arc::clone(&self.config),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: Store> Server<S> {
    /// Create a host over `store`.
    pub fn new(store: S, config: ServerConfig) -> Self {
        let registry = SessionRegistry::new(config.max_sessions);
        Self { store, config: Arc::new(config), registry: Arc::new(Mutex::new(registry)) }
    }

    /// The shared store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of sessions currently hosted.
    pub async fn active_sessions(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Host one connection until it quits or its transport closes.
    ///
    /// The session is registered before its first store operation and
    /// unregistered once the runtime returns, whether or not it failed.
    ///
    /// # Errors
    ///
    /// - [`ServerError::SessionLimit`] if the registry is full. The driver is
    ///   dropped without being polled.
    /// - [`ServerError::Driver`] if the driver fails mid-session.
    pub async fn run_session<D: Driver>(
        &self,
        driver: D,
        connection: Connection,
    ) -> Result<Session, ServerError> {
        let fingerprint = PublicKey::decode(&connection.public_key)
            .map_or_else(|_| UNDECODABLE_FINGERPRINT.to_string(), |key| key.fingerprint());

        let id = self.registry.lock().await.register(SessionInfo::new(fingerprint.clone()))?;

        let span = tracing::info_span!("session", id, fingerprint = %fingerprint);
        let params = self.config.session_params(connection);
        let (columns, rows) = (params.width, params.height);
        let runtime = Runtime::new(driver, self.store.clone(), params);

        async move {
            tracing::info!(columns, rows, "session opened");
            let result = runtime.run().await;

            let elapsed = self
                .registry
                .lock()
                .await
                .unregister(id)
                .and_then(|info| info.started_at.elapsed().ok())
                .unwrap_or_default();
            match &result {
                Ok(session) => {
                    tracing::info!(state = ?session.state(), ?elapsed, "session closed");
                },
                Err(error) => tracing::warn!(%error, ?elapsed, "session ended by driver failure"),
            }
            result.map_err(|error| ServerError::Driver(error.to_string()))
        }
        .instrument(span)
        .await
    }

    /// Spawn [`Server::run_session`] onto the tokio runtime.
    pub fn spawn_session<D>(
        &self,
        driver: D,
        connection: Connection,
    ) -> JoinHandle<Result<Session, ServerError>>
    where
        D: Driver + 'static,
    {
        let server = self.clone();
        tokio::spawn(async move { server.run_session(driver, connection).await })
    }
}

#[cfg(test)]
mod tests {
    use murmur_store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn new_server_hosts_nothing() {
        let server = Server::new(MemoryStore::new(), ServerConfig::default());

        assert_eq!(server.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn capacity_comes_from_config() {
        let config = ServerConfig { max_sessions: 1, ..ServerConfig::default() };
        let server = Server::new(MemoryStore::new(), config);

        let mut registry = server.registry.lock().await;
        registry.register(SessionInfo::new("a")).unwrap();
        assert!(matches!(
            registry.register(SessionInfo::new("b")),
            Err(ServerError::SessionLimit { max: 1 })
        ));
    }

    #[tokio::test]
    async fn clones_share_registry() {
        let server = Server::new(MemoryStore::new(), ServerConfig::default());
        let clone = server.clone();

        server.registry.lock().await.register(SessionInfo::new("a")).unwrap();

        assert_eq!(clone.active_sessions().await, 1);
    }
}
