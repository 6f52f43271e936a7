//! Integration tests for the scorebug link service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start Redis
//! docker run --rm -p 6379:6379 redis:7
//!
//! # Start the service
//! SCOREBUG_REDIS_URL=redis://localhost:6379 \
//! SCOREBUG_BASE_URL=http://localhost:3000 \
//! cargo run -p scorebug-display
//!
//! # Run the ignored tests against it
//! cargo test -p scorebug-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `link_flow` - setup code issuance, claiming, credential verification
//! - `display_pointer` - shared pointer reads/writes and the host-only policy
//!
//! The tests drive a real server over HTTP with a cookie-holding client, so
//! they exercise the credential cookie path exactly as a phone browser
//! would. They are `#[ignore]`d because they need the running service and
//! its Redis alongside.

/// Base URL of the service under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SCOREBUG_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client that holds cookies like a phone browser.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn browser_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
