//! Application state shared across handlers.

use std::sync::Arc;

use cookie::Key;
use secrecy::ExposeSecret;

use crate::config::DisplayConfig;
use crate::display::DisplayPointer;
use crate::pairing::PairingService;
use crate::scores::ScoresClient;
use crate::store::{KeyValueStore, RedisStore, StoreError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// shared store, the pairing services built over it, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DisplayConfig,
    store: Arc<dyn KeyValueStore>,
    pairing: PairingService,
    display: DisplayPointer,
    scores: ScoresClient,
    cookie_key: Option<Key>,
}

impl AppState {
    /// Create the application state with a Redis-backed store.
    ///
    /// The store client is created once here and reused for the life of the
    /// process; it reconnects on demand behind its own interface.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis URL is invalid.
    pub fn new(config: DisplayConfig) -> Result<Self, StoreError> {
        let store = Arc::new(RedisStore::connect(config.redis_url.expose_secret())?);
        Ok(Self::with_store(config, store))
    }

    /// Create the application state over an explicit store implementation.
    #[must_use]
    pub fn with_store(config: DisplayConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let pairing = PairingService::new(store.clone());
        let display = DisplayPointer::new(store.clone());
        let scores = ScoresClient::new(&config.scores_api_base);
        let cookie_key = config
            .session_secret
            .as_ref()
            .map(|secret| Key::derive_from(secret.expose_secret().as_bytes()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                pairing,
                display,
                scores,
                cookie_key,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.inner.config
    }

    /// Get a reference to the key/value store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    /// Get a reference to the pairing state machine.
    #[must_use]
    pub fn pairing(&self) -> &PairingService {
        &self.inner.pairing
    }

    /// Get a reference to the shared display pointer.
    #[must_use]
    pub fn display(&self) -> &DisplayPointer {
        &self.inner.display
    }

    /// Get a reference to the scores provider client.
    #[must_use]
    pub fn scores(&self) -> &ScoresClient {
        &self.inner.scores
    }

    /// Get the credential cookie signing key, if one is configured.
    #[must_use]
    pub fn cookie_key(&self) -> Option<&Key> {
        self.inner.cookie_key.as_ref()
    }
}
