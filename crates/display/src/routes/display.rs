//! Shared display pointer route handlers.

use axum::{Json, extract::State};

use scorebug_core::{DisplayResponse, DisplayWriteRequest, GameId};

use crate::error::{AppError, Result};
use crate::middleware::MaybeLinked;
use crate::state::AppState;

/// `GET /api/display` - the game currently shown on the host.
///
/// Both the host and linked phones poll this and reconcile their local
/// view against it; whatever it says wins.
///
/// # Errors
///
/// Returns an error if the store is unreachable.
pub async fn show(State(state): State<AppState>) -> Result<Json<DisplayResponse>> {
    let current_game_id = state.display().read().await?;
    Ok(Json(DisplayResponse { current_game_id }))
}

/// `POST /api/display` - move or clear the pointer. Host only.
///
/// A linked phone gets 403: its credential proves it is not the host, and
/// a non-host caller moving the pointer would silently redirect the shared
/// display for everyone.
///
/// `gameId: null` (or absent, or the literal string `"null"`, which is what
/// a cleared form field submits) clears the pointer.
///
/// # Errors
///
/// Returns 403 for a linked caller, 400 for an unusable game id, and an
/// internal error if the store is unreachable.
pub async fn update(
    State(state): State<AppState>,
    linked: MaybeLinked,
    Json(body): Json<DisplayWriteRequest>,
) -> Result<Json<DisplayResponse>> {
    let game_id = match body.game_id.as_deref() {
        None | Some("" | "null") => None,
        Some(raw) => Some(GameId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))?),
    };

    state
        .display()
        .write(game_id.as_ref(), linked.is_host())
        .await?;

    Ok(Json(DisplayResponse {
        current_game_id: game_id,
    }))
}
