//! Credential cookie encoding and decoding.
//!
//! The credential itself is the session: the browser carries
//! `{code, token, deviceName}` as JSON in a same-site, HTTP-only cookie and
//! presents it on every request. There is no server-side session state -
//! the authorization record in the store is the only thing a credential is
//! ever checked against.
//!
//! When a signing key is configured the cookie value is HMAC-signed; a
//! cookie that fails signature verification reads as "no credential".

use axum::http::{HeaderMap, header};
use cookie::{Cookie, CookieJar, Key, SameSite};
use thiserror::Error;

use scorebug_core::LinkCredential;

/// Credential cookie name.
pub const SESSION_COOKIE_NAME: &str = "__scorebug_link_session";

/// Cookie lifetime: 60 days, matching the authorization record TTL.
const SESSION_MAX_AGE_DAYS: i64 = 60;

/// Errors producing the credential cookie.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("credential encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("credential cookie signing failed")]
    Sign,
}

/// Build the `Set-Cookie` value that persists a freshly minted credential.
///
/// # Errors
///
/// Returns `SessionError` if the credential cannot be encoded or signed.
pub fn credential_cookie(
    credential: &LinkCredential,
    key: Option<&Key>,
    secure: bool,
) -> Result<String, SessionError> {
    let payload = serde_json::to_string(credential)?;
    let cookie = Cookie::build((SESSION_COOKIE_NAME, payload))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(cookie::time::Duration::days(SESSION_MAX_AGE_DAYS))
        .build();

    match key {
        Some(key) => {
            let mut jar = CookieJar::new();
            jar.signed_mut(key).add(cookie);
            let signed = jar.get(SESSION_COOKIE_NAME).ok_or(SessionError::Sign)?;
            Ok(signed.encoded().to_string())
        }
        None => Ok(cookie.encoded().to_string()),
    }
}

/// Extract the carried credential from a request's `Cookie` header.
///
/// Returns `None` for absent, unparsable, or (when a key is configured)
/// tampered cookies; the request simply proceeds unauthenticated.
#[must_use]
pub fn credential_from_headers(headers: &HeaderMap, key: Option<&Key>) -> Option<LinkCredential> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    let raw = header.split(';').map(str::trim).find_map(|part| {
        Cookie::parse_encoded(part.to_owned())
            .ok()
            .filter(|cookie| cookie.name() == SESSION_COOKIE_NAME)
    })?;

    let value = match key {
        Some(key) => {
            let mut jar = CookieJar::new();
            jar.add_original(raw);
            jar.signed(key).get(SESSION_COOKIE_NAME)?.value().to_owned()
        }
        None => raw.value().to_owned(),
    };

    serde_json::from_str(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn credential() -> LinkCredential {
        LinkCredential {
            code: "A9BC".to_string(),
            token: "T".repeat(32),
            device_name: Some("Phone".to_string()),
        }
    }

    fn headers_with(cookie_value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(cookie_value).expect("header value"),
        );
        headers
    }

    #[test]
    fn unsigned_round_trip() {
        let encoded = credential_cookie(&credential(), None, false).expect("encode");
        assert!(encoded.starts_with(SESSION_COOKIE_NAME));
        assert!(encoded.contains("HttpOnly"));
        assert!(encoded.contains("SameSite=Lax"));
        assert!(encoded.contains("Path=/"));

        let decoded = credential_from_headers(&headers_with(&encoded), None);
        assert_eq!(decoded, Some(credential()));
    }

    #[test]
    fn secure_attribute_follows_flag() {
        let insecure = credential_cookie(&credential(), None, false).expect("encode");
        assert!(!insecure.contains("Secure"));
        let secure = credential_cookie(&credential(), None, true).expect("encode");
        assert!(secure.contains("Secure"));
    }

    #[test]
    fn signed_round_trip() {
        let key = Key::derive_from(&[7u8; 64]);
        let encoded = credential_cookie(&credential(), Some(&key), false).expect("encode");

        let decoded = credential_from_headers(&headers_with(&encoded), Some(&key));
        assert_eq!(decoded, Some(credential()));
    }

    #[test]
    fn signed_cookie_rejects_wrong_key() {
        let key = Key::derive_from(&[7u8; 64]);
        let other = Key::derive_from(&[9u8; 64]);
        let encoded = credential_cookie(&credential(), Some(&key), false).expect("encode");

        assert_eq!(credential_from_headers(&headers_with(&encoded), Some(&other)), None);
    }

    #[test]
    fn signed_cookie_rejects_unsigned_value() {
        let key = Key::derive_from(&[7u8; 64]);
        let encoded = credential_cookie(&credential(), None, false).expect("encode");

        assert_eq!(credential_from_headers(&headers_with(&encoded), Some(&key)), None);
    }

    #[test]
    fn absent_or_garbage_cookie_is_none() {
        assert_eq!(credential_from_headers(&HeaderMap::new(), None), None);
        assert_eq!(
            credential_from_headers(&headers_with("other=1; another=2"), None),
            None
        );
        assert_eq!(
            credential_from_headers(
                &headers_with(&format!("{SESSION_COOKIE_NAME}=not-json")),
                None
            ),
            None
        );
    }
}
