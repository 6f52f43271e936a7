//! Authentication extractor.
//!
//! Resolves the request's carried credential against the store. "Linked"
//! and "host" are the only two identities in the system: a request whose
//! credential verifies belongs to a linked phone, and everything else -
//! no cookie, unparsable cookie, expired record, token mismatch - is the
//! unauthenticated host display.

use axum::{extract::FromRequestParts, http::request::Parts};

use scorebug_core::LinkCredential;

use crate::error::AppError;
use crate::middleware::session::credential_from_headers;
use crate::pairing::PairingError;
use crate::state::AppState;

/// Extractor that resolves the current credential, if any.
///
/// A stale or invalid credential downgrades to `None` rather than
/// rejecting; only a store failure during verification fails the request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(MaybeLinked(credential): MaybeLinked) -> impl IntoResponse {
///     match credential {
///         Some(c) => format!("linked as {:?}", c.device_name),
///         None => "host".to_string(),
///     }
/// }
/// ```
pub struct MaybeLinked(pub Option<LinkCredential>);

impl MaybeLinked {
    /// Whether this request is the unauthenticated host display.
    #[must_use]
    pub const fn is_host(&self) -> bool {
        self.0.is_none()
    }
}

impl FromRequestParts<AppState> for MaybeLinked {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credential) = credential_from_headers(&parts.headers, state.cookie_key()) else {
            return Ok(Self(None));
        };

        match state
            .pairing()
            .verify(&credential.code, &credential.token)
            .await
        {
            Ok(true) => Ok(Self(Some(credential))),
            Ok(false) => Ok(Self(None)),
            // A corrupt record reads as unlinked; losing the store fails the
            // request.
            Err(PairingError::Record(error)) => {
                tracing::warn!(error = %error, "unreadable authorization record");
                Ok(Self(None))
            }
            Err(error @ PairingError::Store(_)) => Err(error.into()),
        }
    }
}
