//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Not everything users see flows through here: "no code is live" and "code
//! does not match" are ordinary claim outcomes rendered by the claim page,
//! and a stale credential just downgrades the request to host behavior.
//! `AppError` covers the cases that genuinely fail the in-flight request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::display::DisplayError;
use crate::middleware::session::SessionError;
use crate::pairing::PairingError;
use crate::scores::ScoresError;
use crate::store::StoreError;

/// Application-level error type for the scorebug service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Key/value store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Pairing operation failed.
    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),

    /// Display pointer operation failed.
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    /// Scores provider operation failed.
    #[error("Scores provider error: {0}")]
    Scores(#[from] ScoresError),

    /// Credential cookie could not be produced.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if !matches!(
            self,
            Self::BadRequest(_) | Self::Display(DisplayError::NotHost)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Display(DisplayError::NotHost) => StatusCode::FORBIDDEN,
            Self::Scores(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_)
            | Self::Pairing(_)
            | Self::Display(_)
            | Self::Session(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Display(DisplayError::NotHost) => self.to_string(),
            Self::Scores(_) => "External service error".to_string(),
            Self::BadRequest(_) => self.to_string(),
            _ => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid game id".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid game id");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Display(DisplayError::NotHost)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_not_host_message_is_not_masked() {
        let response = AppError::Display(DisplayError::NotHost).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
