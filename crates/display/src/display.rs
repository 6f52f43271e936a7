//! Shared display pointer.
//!
//! A single global value naming the game currently shown on the host.
//! Every viewer of the host polls it and reconciles local UI state against
//! it; the authoritative value always wins on the next poll tick, so no
//! transactional support is needed.
//!
//! Only the unauthenticated host may write the pointer. A linked phone
//! issuing the same write path would silently redirect the shared display,
//! so the write path requires an explicit host capability.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use scorebug_core::{GameId, GameIdError};

use crate::store::{KeyValueStore, StoreError};

/// Store key holding the current game id.
pub const CURRENT_GAME_KEY: &str = "current-game-id";

/// TTL applied whenever the pointer is set: 4 hours, room for a full
/// regulation game plus intermissions and overtime.
pub const POINTER_TTL: Duration = Duration::from_secs(14_400);

/// Display pointer errors.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// A non-host caller tried to move the pointer.
    #[error("only the host display may change the shown game")]
    NotHost,

    /// The key/value store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The stored pointer is not a usable game id.
    #[error("stored game id corrupted: {0}")]
    Corrupt(#[from] GameIdError),
}

/// The shared display pointer over an injected key/value store.
#[derive(Clone)]
pub struct DisplayPointer {
    store: Arc<dyn KeyValueStore>,
}

impl DisplayPointer {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the game currently shown on the host, `None` when no game is
    /// selected (including after the pointer's TTL elapsed).
    ///
    /// # Errors
    ///
    /// Returns `DisplayError::Store` if the store is unreachable, or
    /// `DisplayError::Corrupt` if the stored value is not a game id.
    pub async fn read(&self) -> Result<Option<GameId>, DisplayError> {
        match self.store.get(CURRENT_GAME_KEY).await? {
            Some(raw) => Ok(Some(GameId::parse(&raw)?)),
            None => Ok(None),
        }
    }

    /// Move the pointer. `Some` stores the id with the 4-hour TTL; `None`
    /// deletes the key outright, meaning "no game selected".
    ///
    /// # Errors
    ///
    /// Returns `DisplayError::NotHost` when `is_host` is false; the store is
    /// not touched in that case. Returns `DisplayError::Store` if the store
    /// is unreachable.
    pub async fn write(
        &self,
        game_id: Option<&GameId>,
        is_host: bool,
    ) -> Result<(), DisplayError> {
        if !is_host {
            return Err(DisplayError::NotHost);
        }

        match game_id {
            Some(id) => {
                self.store
                    .set(CURRENT_GAME_KEY, id.as_str(), Some(POINTER_TTL))
                    .await?;
                tracing::info!(game_id = %id, "display pointer set");
            }
            None => {
                self.store.del(CURRENT_GAME_KEY).await?;
                tracing::info!("display pointer cleared");
            }
        }
        Ok(())
    }
}
