//! Scores provider client.
//!
//! Read-only client for the external stats API. Responses are cached with
//! TTLs matching the frontend poll cadences, so a room full of viewers
//! polling the same game costs one upstream request per interval:
//!
//! - day schedule: 1200 seconds
//! - live game feed: 20 seconds
//!
//! Transport failures are errors; the provider's own structured error
//! payloads are data and flow through (and are cached) like any payload.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use thiserror::Error;

use scorebug_core::GameId;
use scorebug_core::poll::{FEED_POLL_SECS, SCHEDULE_POLL_SECS};

pub use types::{ProviderError, ProviderPayload};

/// Default provider endpoint.
pub const DEFAULT_API_BASE: &str = "https://statsapi.web.nhl.com/api/v1";

/// Errors from the scores provider client.
#[derive(Debug, Error)]
pub enum ScoresError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success status without a structured
    /// error payload.
    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the external stats API.
#[derive(Clone)]
pub struct ScoresClient {
    inner: Arc<ScoresClientInner>,
}

struct ScoresClientInner {
    client: reqwest::Client,
    base: String,
    schedule_cache: Cache<String, ProviderPayload>,
    feed_cache: Cache<String, ProviderPayload>,
}

impl ScoresClient {
    /// Create a new provider client for the given API base URL.
    #[must_use]
    pub fn new(base: &str) -> Self {
        let schedule_cache = Cache::builder()
            .max_capacity(32)
            .time_to_live(Duration::from_secs(SCHEDULE_POLL_SECS))
            .build();
        let feed_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(FEED_POLL_SECS))
            .build();

        Self {
            inner: Arc::new(ScoresClientInner {
                client: reqwest::Client::new(),
                base: base.trim_end_matches('/').to_owned(),
                schedule_cache,
                feed_cache,
            }),
        }
    }

    /// The day's schedule, hydrated with teams and linescores.
    ///
    /// `date` is `YYYY-MM-DD`; today (UTC) when absent.
    ///
    /// # Errors
    ///
    /// Returns `ScoresError` if the provider is unreachable.
    pub async fn schedule(&self, date: Option<&str>) -> Result<ProviderPayload, ScoresError> {
        let date = date.map_or_else(
            || Utc::now().format("%Y-%m-%d").to_string(),
            ToOwned::to_owned,
        );

        if let Some(hit) = self.inner.schedule_cache.get(&date).await {
            return Ok(hit);
        }

        let url = format!(
            "{}/schedule?hydrate=team,linescore&date={date}",
            self.inner.base
        );
        let payload = self.fetch(&url).await?;
        self.inner
            .schedule_cache
            .insert(date, payload.clone())
            .await;
        Ok(payload)
    }

    /// The live feed for a game.
    ///
    /// # Errors
    ///
    /// Returns `ScoresError` if the provider is unreachable.
    pub async fn live_feed(&self, game_id: &GameId) -> Result<ProviderPayload, ScoresError> {
        let key = game_id.as_str().to_owned();
        if let Some(hit) = self.inner.feed_cache.get(&key).await {
            return Ok(hit);
        }

        let url = format!("{}/game/{game_id}/feed/live", self.inner.base);
        let payload = self.fetch(&url).await?;
        self.inner.feed_cache.insert(key, payload.clone()).await;
        Ok(payload)
    }

    /// Execute a GET and decode the payload-or-error union.
    ///
    /// The provider serves its structured errors with non-2xx statuses too
    /// (an unknown game id is a 404 with a `message` body), so a non-success
    /// status still gets a decode attempt before being surfaced as a
    /// transport error.
    async fn fetch(&self, url: &str) -> Result<ProviderPayload, ScoresError> {
        tracing::debug!(url, "fetching from scores provider");
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        if let Ok(payload) = response.json::<ProviderPayload>().await
            && payload.is_error()
        {
            return Ok(payload);
        }
        Err(ScoresError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ScoresClient::new("https://example.test/api/v1/");
        assert_eq!(client.inner.base, "https://example.test/api/v1");
    }
}
