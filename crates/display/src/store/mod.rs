//! Key/value store client.
//!
//! All pairing state lives in a shared, process-external key/value store
//! with expiring keys. This module defines the repository interface the
//! rest of the service is written against, plus the Redis implementation
//! used in production.
//!
//! ## Key patterns
//!
//! ```text
//! link-code          → live setup code (600s TTL)
//! code-{CODE}        → authorization record JSON (60 day TTL)
//! current-game-id    → shared display pointer (4h TTL)
//! ```
//!
//! Services receive an `Arc<dyn KeyValueStore>` so unit tests can substitute
//! the in-memory implementation.

#[cfg(test)]
mod memory;

#[cfg(test)]
pub use memory::MemoryStore;

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, ErrorKind};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors from the key/value store.
///
/// Store unavailability is fatal to the operation that hit it; nothing in
/// this module retries beyond the single reconnect attempt.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection could not be established or was lost mid-operation.
    #[error("store connection error: {0}")]
    Connection(redis::RedisError),

    /// The store rejected a command.
    #[error("store command error: {0}")]
    Command(redis::RedisError),
}

/// Remaining time-to-live of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Key exists and expires in this many seconds.
    Remaining(u64),
    /// Key exists but has no expiry.
    Persistent,
    /// Key does not exist.
    Missing,
}

impl Ttl {
    /// Seconds remaining, treating persistent and missing keys as zero.
    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Remaining(secs) => secs,
            Self::Persistent | Self::Missing => 0,
        }
    }
}

/// Repository interface over the shared key/value store.
///
/// Coordination between concurrent requests happens entirely through the
/// store's atomic per-key read/write primitives; there is no in-process
/// locking above this interface, and callers must not assume ordering
/// between two independent requests touching the same key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a key's value, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a key, optionally with an expiry. Overwrites any prior value
    /// and TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), StoreError>;

    /// Inspect a key's remaining time-to-live.
    async fn ttl(&self, key: &str) -> Result<Ttl, StoreError>;
}

// =============================================================================
// RedisStore
// =============================================================================

/// Redis-backed [`KeyValueStore`].
///
/// The multiplexed connection is opened lazily and reused. When an operation
/// fails at the connection level the cached connection is discarded and the
/// next operation reopens it. Reconnect attempts are serialized behind the
/// mutex so concurrent operations never interleave with a half-closed
/// connection; established connections are cloned out from under the lock,
/// so normal traffic is not serialized.
pub struct RedisStore {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Create a store client for the given Redis URL.
    ///
    /// No connection is made until the first operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the URL cannot be parsed.
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(StoreError::Connection)?;
        Ok(Self {
            client,
            conn: Mutex::new(None),
        })
    }

    /// Get the cached connection, opening one if none is live.
    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(StoreError::Connection)?;
        tracing::debug!("store connection established");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Classify a command failure, dropping the cached connection when the
    /// failure means it is no longer usable.
    async fn command_error(&self, error: redis::RedisError) -> StoreError {
        if error.is_connection_dropped() || error.kind() == ErrorKind::IoError {
            *self.conn.lock().await = None;
            tracing::warn!(error = %error, "store connection lost");
            StoreError::Connection(error)
        } else {
            StoreError::Command(error)
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        match conn.get(key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.command_error(e).await),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let result: redis::RedisResult<()> = match ttl {
            Some(ttl) => conn.set_ex(key, value, ttl.as_secs()).await,
            None => conn.set(key, value).await,
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(self.command_error(e).await),
        }
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        match conn.del::<_, ()>(key).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.command_error(e).await),
        }
    }

    async fn ttl(&self, key: &str) -> Result<Ttl, StoreError> {
        let mut conn = self.connection().await?;
        let remaining: i64 = match conn.ttl(key).await {
            Ok(value) => value,
            Err(e) => return Err(self.command_error(e).await),
        };
        // Redis sentinels: -2 = key absent, -1 = key without expiry.
        Ok(match remaining {
            -2 => Ttl::Missing,
            -1 => Ttl::Persistent,
            secs => Ttl::Remaining(secs.max(0).unsigned_abs()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_seconds_flattens_sentinels() {
        assert_eq!(Ttl::Remaining(45).seconds(), 45);
        assert_eq!(Ttl::Persistent.seconds(), 0);
        assert_eq!(Ttl::Missing.seconds(), 0);
    }
}
