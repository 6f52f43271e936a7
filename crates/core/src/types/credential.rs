//! Link credential carried by a paired browser.

use serde::{Deserialize, Serialize};

/// The `(code, token)` pair a linked browser carries to prove prior
/// authorization, plus the optional human label it was claimed under.
///
/// A credential is valid iff an authorization record exists for `code` whose
/// stored token equals `token` exactly. The credential is content-addressed
/// by the claimed code value, not by any device identity.
///
/// Serialized as camelCase JSON; this is the cookie payload format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCredential {
    /// The setup code this credential was claimed against.
    pub code: String,
    /// The 32-character opaque secret minted at claim time.
    pub token: String,
    /// Optional human label for the claiming device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_camel_case() {
        let credential = LinkCredential {
            code: "A9BC".to_string(),
            token: "T".repeat(32),
            device_name: Some("Living room TV".to_string()),
        };
        let json = serde_json::to_string(&credential).expect("serialize");
        assert!(json.contains("\"deviceName\""));
        let back: LinkCredential = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, credential);
    }

    #[test]
    fn device_name_is_optional() {
        let json = r#"{"code":"A9BC","token":"tok"}"#;
        let credential: LinkCredential = serde_json::from_str(json).expect("deserialize");
        assert_eq!(credential.device_name, None);
    }
}
