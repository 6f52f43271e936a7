//! Session route handlers.

use axum::Json;

use scorebug_core::SessionResponse;
use scorebug_core::poll::{POINTER_POLL_HOST_SECS, POINTER_POLL_LINKED_SECS};

use crate::middleware::MaybeLinked;

/// `GET /api/session` - who is this browser?
///
/// Linked phones poll the display pointer lazily; the host follows it
/// closely. The response tells the caller which cadence applies to it.
pub async fn show(linked: MaybeLinked) -> Json<SessionResponse> {
    let response = match linked.0 {
        Some(credential) => SessionResponse {
            authenticated: true,
            device_name: credential.device_name,
            poll_secs: POINTER_POLL_LINKED_SECS,
        },
        None => SessionResponse {
            authenticated: false,
            device_name: None,
            poll_secs: POINTER_POLL_HOST_SECS,
        },
    };
    Json(response)
}
