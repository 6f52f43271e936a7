//! Scores provider payload types.
//!
//! The provider's schemas are not interpreted here beyond one discriminant:
//! an error payload carries a `message`/`messageNumber` field pair, a feed
//! payload does not. Everything else passes through untouched for the
//! frontend to render.

use serde::{Deserialize, Serialize};

/// Structured error payload from the provider (e.g. unknown game id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderError {
    pub message: String,
    pub message_number: i64,
}

/// A provider response: either a live-feed/schedule payload or a structured
/// error, distinguished by the presence of the error field pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderPayload {
    Error(ProviderError),
    Feed(serde_json::Value),
}

impl ProviderPayload {
    /// Whether this payload is the provider's structured error shape.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
