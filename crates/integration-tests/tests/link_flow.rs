//! Integration tests for the pairing flow.
//!
//! These tests require:
//! - A running Redis (docker run --rm -p 6379:6379 redis:7)
//! - The display service running (cargo run -p scorebug-display)
//!
//! Run with: cargo test -p scorebug-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use scorebug_core::{ClaimResponse, LinkCompleteResponse, LinkStatusResponse, SetupResponse};
use scorebug_integration_tests::{base_url, browser_client};

#[tokio::test]
#[ignore = "Requires running display service and Redis"]
async fn setup_issues_a_claimable_code() {
    let client = browser_client();
    let base_url = base_url();

    let setup: SetupResponse = client
        .get(format!("{base_url}/link/setup"))
        .send()
        .await
        .expect("setup request")
        .json()
        .await
        .expect("setup response");

    assert_eq!(setup.code.len(), 4);
    assert!(setup.refresh_secs > 0);

    // The claim page preflight sees it.
    let status: LinkStatusResponse = client
        .get(format!("{base_url}/link"))
        .send()
        .await
        .expect("preflight request")
        .json()
        .await
        .expect("preflight response");
    assert!(status.code_exists);

    // An immediate re-fetch returns the same code; a fresh code has far
    // more than the refresh floor left.
    let again: SetupResponse = client
        .get(format!("{base_url}/link/setup"))
        .send()
        .await
        .expect("setup request")
        .json()
        .await
        .expect("setup response");
    assert_eq!(again.code, setup.code);
}

#[tokio::test]
#[ignore = "Requires running display service and Redis"]
async fn wrong_code_is_rejected_without_linking() {
    let client = browser_client();
    let base_url = base_url();

    // Make sure some code is live so this exercises the mismatch path.
    let _: SetupResponse = client
        .get(format!("{base_url}/link/setup"))
        .send()
        .await
        .expect("setup request")
        .json()
        .await
        .expect("setup response");

    // "0000" uses characters outside the code alphabet, so it can never
    // match a generated code.
    let response = client
        .post(format!("{base_url}/link"))
        .json(&json!({"code": "0000"}))
        .send()
        .await
        .expect("claim request");
    assert_eq!(response.status(), StatusCode::OK);

    let claim: ClaimResponse = response.json().await.expect("claim response");
    let ClaimResponse::Rejected { used_code, .. } = claim else {
        panic!("expected rejection, got {claim:?}");
    };
    assert_eq!(used_code.as_deref(), Some("0000"));

    // Still the host.
    let session: Value = client
        .get(format!("{base_url}/api/session"))
        .send()
        .await
        .expect("session request")
        .json()
        .await
        .expect("session response");
    assert_eq!(session["authenticated"], Value::Bool(false));
}

#[tokio::test]
#[ignore = "Requires running display service and Redis"]
async fn full_link_flow() {
    // The "host" has no cookie jar state worth keeping; the "phone" client
    // holds the credential cookie across requests.
    let host = browser_client();
    let phone = browser_client();
    let base_url = base_url();

    let setup: SetupResponse = host
        .get(format!("{base_url}/link/setup"))
        .send()
        .await
        .expect("setup request")
        .json()
        .await
        .expect("setup response");

    let claim: ClaimResponse = phone
        .post(format!("{base_url}/link"))
        .json(&json!({"code": setup.code, "deviceName": "Integration phone"}))
        .send()
        .await
        .expect("claim request")
        .json()
        .await
        .expect("claim response");
    assert!(
        matches!(claim, ClaimResponse::Linked { linked: true, .. }),
        "expected linked outcome, got {claim:?}"
    );

    // The phone's cookie now verifies on every request.
    let session: Value = phone
        .get(format!("{base_url}/api/session"))
        .send()
        .await
        .expect("session request")
        .json()
        .await
        .expect("session response");
    assert_eq!(session["authenticated"], Value::Bool(true));
    assert_eq!(session["deviceName"], Value::from("Integration phone"));

    // The host's completion poll reports the claim and retires the code.
    let complete: LinkCompleteResponse = host
        .get(format!("{base_url}/link/setup/complete?code={}", setup.code))
        .send()
        .await
        .expect("complete request")
        .json()
        .await
        .expect("complete response");
    assert!(complete.linked);

    let status: LinkStatusResponse = host
        .get(format!("{base_url}/link"))
        .send()
        .await
        .expect("preflight request")
        .json()
        .await
        .expect("preflight response");
    assert!(!status.code_exists);
}
