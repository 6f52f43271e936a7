//! Scores provider proxy route handlers.
//!
//! Thin pass-through over the cached provider client so every viewer in a
//! room shares one upstream request per poll interval. Payloads are not
//! interpreted; the provider's structured error payloads flow through as
//! data for the frontend to render.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use scorebug_core::GameId;

use crate::error::{AppError, Result};
use crate::scores::ProviderPayload;
use crate::state::AppState;

/// Query parameters for the schedule endpoint.
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
}

/// `GET /api/schedule` - the day's games.
///
/// # Errors
///
/// Returns 502 if the provider is unreachable.
pub async fn schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ProviderPayload>> {
    let payload = state.scores().schedule(query.date.as_deref()).await?;
    Ok(Json(payload))
}

/// `GET /api/game/{game_id}/feed` - the live feed for a game.
///
/// # Errors
///
/// Returns 400 for an unusable game id, 502 if the provider is
/// unreachable.
pub async fn feed(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<ProviderPayload>> {
    let game_id = GameId::parse(&game_id).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let payload = state.scores().live_feed(&game_id).await?;
    Ok(Json(payload))
}
