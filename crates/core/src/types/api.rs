//! Wire DTOs for the scorebug HTTP surface.
//!
//! Shared between the service handlers and the integration-test harness so
//! both sides agree on field names. Everything is camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::types::game::GameId;

/// Response for `GET /link/setup` - the code the host shows on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupResponse {
    /// Public base URL the phone should visit (scheme included).
    pub root: String,
    /// The live 4-character setup code.
    pub code: String,
    /// How often the setup screen should re-fetch this response.
    pub refresh_secs: u64,
}

/// Response for `GET /link` - claim-page preflight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatusResponse {
    /// Whether a setup code is currently live on some host.
    pub code_exists: bool,
}

/// Request body for `POST /link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    /// The 4-character code the user typed.
    pub code: String,
    /// Optional label for the claiming device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Response for `POST /link`.
///
/// A claim never fails with an error status: the empty state ("no code is
/// live anywhere") and a mismatch are ordinary outcomes the claim page
/// renders inline. `usedCode` echoes the rejected submission so the page can
/// keep the message hidden while the user is still editing that same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimResponse {
    /// The code matched; the device is now linked and the response carries
    /// the credential cookie.
    #[serde(rename_all = "camelCase")]
    Linked {
        linked: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_name: Option<String>,
    },
    /// No live code, or the submitted code did not match.
    #[serde(rename_all = "camelCase")]
    Rejected {
        msg: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        used_code: Option<String>,
    },
}

/// Response for `GET /link/setup/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCompleteResponse {
    /// True once an authorization record exists for the polled code; the
    /// host should leave the setup screen.
    pub linked: bool,
}

/// Response for `GET /api/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Whether the request carried a credential that verified.
    pub authenticated: bool,
    /// Device label from the credential, when linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// Display-pointer poll cadence for this caller.
    pub poll_secs: u64,
}

/// Response for `GET /api/display`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResponse {
    /// The game currently shown on the host, if any.
    pub current_game_id: Option<GameId>,
}

/// Request body for `POST /api/display`.
///
/// `gameId: null` (or absent) clears the pointer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayWriteRequest {
    #[serde(default)]
    pub game_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_response_linked_shape() {
        let response = ClaimResponse::Linked {
            linked: true,
            device_name: Some("Kitchen".to_string()),
        };
        let json = serde_json::to_string(&response).expect("serialize");
        assert_eq!(json, r#"{"linked":true,"deviceName":"Kitchen"}"#);
    }

    #[test]
    fn claim_response_rejection_echoes_code() {
        let response = ClaimResponse::Rejected {
            msg: "Code provided does not match the one on screen.".to_string(),
            used_code: Some("A9BC".to_string()),
        };
        let json = serde_json::to_string(&response).expect("serialize");
        assert!(json.contains("\"usedCode\":\"A9BC\""));

        // And the untagged deserialize picks the right variant back out.
        let back: ClaimResponse = serde_json::from_str(&json).expect("deserialize");
        assert!(matches!(back, ClaimResponse::Rejected { used_code: Some(code), .. } if code == "A9BC"));
    }

    #[test]
    fn display_write_defaults_to_clear() {
        let request: DisplayWriteRequest = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(request.game_id, None);
    }

    #[test]
    fn display_response_null_pointer() {
        let response = DisplayResponse {
            current_game_id: None,
        };
        let json = serde_json::to_string(&response).expect("serialize");
        assert_eq!(json, r#"{"currentGameId":null}"#);
    }
}
