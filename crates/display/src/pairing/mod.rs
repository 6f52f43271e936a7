//! Pairing state machine.
//!
//! Owns the lifecycle of the setup code a host displays and the
//! authorization records minted when phones claim it:
//!
//! ```text
//! NoCode → CodeLive → (ClaimPending) → Claimed/Expired → NoCode
//! ```
//!
//! - The host polls [`PairingService::issue_or_refresh`] to keep a claimable
//!   code on screen.
//! - A phone submits its guess through [`PairingService::claim`].
//! - Every later request from that phone re-validates through
//!   [`PairingService::verify`].
//! - The host polls [`PairingService::confirm_linked`] to learn a claim
//!   landed and retire the consumed code.

pub mod code;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scorebug_core::LinkCredential;

use crate::store::{KeyValueStore, StoreError};
use code::{CODE_LENGTH, TOKEN_LENGTH, random_string};

/// Store key holding the live setup code. There is at most one live code
/// globally; this single well-known key is what enforces that.
pub const LINK_CODE_KEY: &str = "link-code";

/// Initial TTL of a setup code.
pub const CODE_TTL: Duration = Duration::from_secs(600);

/// Remaining-TTL floor below which the code is regenerated.
///
/// 45 seconds is probably too little time to pull out a phone and type in
/// the address in order to enter the code. Shortening the initial TTL
/// instead would not help: the user could still catch the tail of a code's
/// lifetime and fail the link attempt mid-entry.
pub const REFRESH_FLOOR_SECS: u64 = 45;

/// TTL of an authorization record: 60 days.
pub const RECORD_TTL: Duration = Duration::from_secs(5_184_000);

/// Store key of the authorization record for a claimed code.
#[must_use]
pub fn record_key(claimed_code: &str) -> String {
    format!("code-{claimed_code}")
}

/// Durable proof that a setup code was successfully claimed.
///
/// Written exactly once per successful claim, immutable thereafter, and
/// destroyed only by TTL expiry. Content-addressed by the claimed code
/// value; the camelCase field names are part of the stored wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRecord {
    /// The opaque secret minted for the claiming device.
    pub token: String,
    /// Optional human label for the claiming device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Pairing errors.
#[derive(Debug, Error)]
pub enum PairingError {
    /// The key/value store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An authorization record could not be decoded.
    #[error("authorization record corrupted: {0}")]
    Record(#[from] serde_json::Error),
}

/// Outcome of a claim attempt.
///
/// Only [`ClaimOutcome::Linked`] changes any state; the other two are
/// ordinary user-visible conditions, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// No setup code is live anywhere.
    NoCode,
    /// The submitted code does not equal the live one.
    Mismatch {
        /// The rejected submission, echoed so the claim page can keep the
        /// message hidden while the user is still editing that value.
        submitted: String,
    },
    /// The code matched; the device is linked and holds this credential.
    Linked(LinkCredential),
}

/// The pairing state machine over an injected key/value store.
#[derive(Clone)]
pub struct PairingService {
    store: Arc<dyn KeyValueStore>,
}

impl PairingService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whether a setup code is currently live. Claim-page preflight.
    ///
    /// # Errors
    ///
    /// Returns `PairingError::Store` if the store is unreachable.
    pub async fn code_exists(&self) -> Result<bool, PairingError> {
        Ok(self.store.get(LINK_CODE_KEY).await?.is_some())
    }

    /// Return the live setup code, regenerating it when absent or about to
    /// expire.
    ///
    /// A code with at least [`REFRESH_FLOOR_SECS`] of TTL left is returned
    /// unchanged, TTL untouched. Otherwise a fresh 4-character code is
    /// stored with the full [`CODE_TTL`], overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns `PairingError::Store` if the store is unreachable.
    pub async fn issue_or_refresh(&self) -> Result<String, PairingError> {
        if let Some(live) = self.store.get(LINK_CODE_KEY).await? {
            let ttl = self.store.ttl(LINK_CODE_KEY).await?;
            if ttl.seconds() >= REFRESH_FLOOR_SECS {
                return Ok(live);
            }
        }

        let fresh = random_string(CODE_LENGTH);
        self.store
            .set(LINK_CODE_KEY, &fresh, Some(CODE_TTL))
            .await?;
        tracing::info!("setup code refreshed");
        Ok(fresh)
    }

    /// Attempt to claim the live setup code.
    ///
    /// On a match, mints a fresh token, persists the authorization record
    /// under the claimed code with a 60-day TTL, and returns the credential
    /// the session layer hands to the browser.
    ///
    /// There is a window between reading the live code and writing the
    /// record in which the host could refresh the code; the stale record is
    /// still honored by [`Self::verify`], so the claimer stays linked. See
    /// DESIGN.md for why this is accepted rather than closed with a
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `PairingError::Store` if the store is unreachable.
    pub async fn claim(
        &self,
        submitted: &str,
        device_name: Option<String>,
    ) -> Result<ClaimOutcome, PairingError> {
        let Some(live) = self.store.get(LINK_CODE_KEY).await? else {
            return Ok(ClaimOutcome::NoCode);
        };

        if submitted != live {
            return Ok(ClaimOutcome::Mismatch {
                submitted: submitted.to_owned(),
            });
        }

        let token = random_string(TOKEN_LENGTH);
        let record = AuthorizationRecord {
            token: token.clone(),
            device_name: device_name.clone(),
        };
        let encoded = serde_json::to_string(&record)?;
        self.store
            .set(&record_key(&live), &encoded, Some(RECORD_TTL))
            .await?;
        tracing::info!(device_name = ?record.device_name, "device linked");

        Ok(ClaimOutcome::Linked(LinkCredential {
            code: live,
            token,
            device_name,
        }))
    }

    /// Check a carried credential against its authorization record.
    ///
    /// True iff a record exists for `code` and its stored token equals
    /// `token`. One store read; an absent or expired record simply reads as
    /// not-linked.
    ///
    /// # Errors
    ///
    /// Returns `PairingError::Store` if the store is unreachable, or
    /// `PairingError::Record` if the stored record is not valid JSON.
    pub async fn verify(&self, claimed_code: &str, token: &str) -> Result<bool, PairingError> {
        if claimed_code.is_empty() || token.is_empty() {
            return Ok(false);
        }
        let Some(raw) = self.store.get(&record_key(claimed_code)).await? else {
            return Ok(false);
        };
        let record: AuthorizationRecord = serde_json::from_str(&raw)?;
        Ok(record.token == token)
    }

    /// Host-side completion poll.
    ///
    /// Given the code the host last displayed, returns true once an
    /// authorization record exists for it - meaning the link succeeded on
    /// some phone - and deletes the live setup code so the host stops
    /// showing a code that has already been consumed.
    ///
    /// # Errors
    ///
    /// Returns `PairingError::Store` if the store is unreachable.
    pub async fn confirm_linked(&self, displayed_code: &str) -> Result<bool, PairingError> {
        if self.store.get(&record_key(displayed_code)).await?.is_none() {
            return Ok(false);
        }
        self.store.del(LINK_CODE_KEY).await?;
        Ok(true)
    }
}
