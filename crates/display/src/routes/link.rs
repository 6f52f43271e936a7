//! Pairing route handlers.
//!
//! The phone side (`/link`) and the host side (`/link/setup`) of the
//! pairing flow. Claim outcomes that are user-visible states - no live
//! code, code mismatch - come back as 200s with a message payload; the
//! claim page renders them inline rather than treating them as failures.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;

use scorebug_core::poll::CODE_REFRESH_SECS;
use scorebug_core::{ClaimRequest, ClaimResponse, LinkCompleteResponse, LinkStatusResponse, SetupResponse};

use crate::error::{AppError, Result};
use crate::middleware::session::credential_cookie;
use crate::pairing::ClaimOutcome;
use crate::state::AppState;

/// Message for a claim when no setup code is live anywhere.
const NO_CODE_MSG: &str =
    "No code is available. Make sure the setup page is shown on your scorebug.";

/// Message for a claim that does not match the live code.
const MISMATCH_MSG: &str = "Code provided does not match the one on screen.";

/// `GET /link` - claim-page preflight: is there anything to claim?
///
/// # Errors
///
/// Returns an error if the store is unreachable.
pub async fn status(State(state): State<AppState>) -> Result<Json<LinkStatusResponse>> {
    let code_exists = state.pairing().code_exists().await?;
    Ok(Json(LinkStatusResponse { code_exists }))
}

/// `POST /link` - claim the live setup code.
///
/// On success the response carries the credential cookie; the browser is
/// linked from its next request onward.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the cookie cannot be
/// built.
pub async fn claim(
    State(state): State<AppState>,
    Json(body): Json<ClaimRequest>,
) -> Result<Response> {
    // The claim page uppercases as the user types; normalize the same way
    // so a lowercase submission from a raw API client still matches.
    let submitted = body.code.trim().to_uppercase();
    let device_name = body
        .device_name
        .or_else(|| state.config().device_name.clone());

    match state.pairing().claim(&submitted, device_name).await? {
        ClaimOutcome::NoCode => Ok(Json(ClaimResponse::Rejected {
            msg: NO_CODE_MSG.to_string(),
            used_code: None,
        })
        .into_response()),
        ClaimOutcome::Mismatch { submitted } => Ok(Json(ClaimResponse::Rejected {
            msg: MISMATCH_MSG.to_string(),
            used_code: Some(submitted),
        })
        .into_response()),
        ClaimOutcome::Linked(credential) => {
            let cookie = credential_cookie(
                &credential,
                state.cookie_key(),
                state.config().is_secure(),
            )?;
            Ok((
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Json(ClaimResponse::Linked {
                    linked: true,
                    device_name: credential.device_name,
                }),
            )
                .into_response())
        }
    }
}

/// `GET /link/setup` - the code the host shows on screen.
///
/// Issues a fresh code when none is live or the current one is about to
/// expire; otherwise returns the live code untouched. The host re-fetches
/// this on `refreshSecs` so the displayed code stays claimable.
///
/// # Errors
///
/// Returns an error if the store is unreachable.
pub async fn setup(State(state): State<AppState>) -> Result<Json<SetupResponse>> {
    let code = state.pairing().issue_or_refresh().await?;
    Ok(Json(SetupResponse {
        root: state.config().base_url.clone(),
        code,
        refresh_secs: CODE_REFRESH_SECS,
    }))
}

/// Query parameters for the completion poll.
#[derive(Debug, Deserialize)]
pub struct CompleteQuery {
    /// The code the host last displayed.
    pub code: String,
}

/// `GET /link/setup/complete` - host-side completion poll.
///
/// Reports whether the displayed code has been claimed; on the first
/// affirmative poll the consumed code is retired so the host stops showing
/// it.
///
/// # Errors
///
/// Returns an error if the store is unreachable.
pub async fn complete(
    State(state): State<AppState>,
    Query(query): Query<CompleteQuery>,
) -> Result<Json<LinkCompleteResponse>> {
    let code = query.code.trim().to_uppercase();
    if code.is_empty() {
        return Err(AppError::BadRequest("code must not be empty".to_string()));
    }
    let linked = state.pairing().confirm_linked(&code).await?;
    Ok(Json(LinkCompleteResponse { linked }))
}
