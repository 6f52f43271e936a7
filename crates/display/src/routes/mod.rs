//! HTTP route handlers for the scorebug service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (store round trip)
//!
//! # Pairing
//! GET  /link                       - Claim-page preflight (is a code live?)
//! POST /link                       - Claim the live code (rate limited)
//! GET  /link/setup                 - Issue/refresh the code the host shows
//! GET  /link/setup/complete        - Host poll: has the code been claimed?
//!
//! # API
//! GET  /api/session                - Linked/host identity + poll cadence
//! GET  /api/display                - Read the shared display pointer
//! POST /api/display                - Move/clear the pointer (host only)
//! GET  /api/schedule               - Day schedule (cached 1200s)
//! GET  /api/game/{game_id}/feed    - Live feed (cached 20s)
//! ```

pub mod display;
pub mod link;
pub mod scores;
pub mod session;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::claim_rate_limiter;
use crate::state::AppState;

/// Create the pairing routes router.
///
/// The claim path carries the per-IP rate limiter; four-character codes
/// must not be brute-forceable within a code's lifetime.
pub fn link_routes() -> Router<AppState> {
    let claim = Router::new()
        .route("/", get(link::status).post(link::claim))
        .route_layer(claim_rate_limiter());

    Router::new()
        .merge(claim)
        .route("/setup", get(link::setup))
        .route("/setup/complete", get(link::complete))
}

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session::show))
        .route("/display", get(display::show).post(display::update))
        .route("/schedule", get(scores::schedule))
        .route("/game/{game_id}/feed", get(scores::feed))
}

/// Create all routes for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/link", link_routes())
        .nest("/api", api_routes())
}
