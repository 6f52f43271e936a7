//! HTTP middleware for the scorebug service.
//!
//! - [`session`] - credential cookie encoding/decoding
//! - [`auth`] - request extractors that resolve the carried credential
//! - [`rate_limit`] - per-IP limiter for the claim endpoint

pub mod auth;
pub mod rate_limit;
pub mod session;

pub use auth::MaybeLinked;
pub use rate_limit::claim_rate_limiter;
pub use session::{SESSION_COOKIE_NAME, credential_cookie, credential_from_headers};
