//! Client poll cadences.
//!
//! The scorebug frontends reconcile against the server on fixed wall-clock
//! intervals. These constants are echoed in API responses (`pollSecs`,
//! `refreshSecs`) so clients never hardcode them; changing one here changes
//! the contract for every viewer of a host.

/// Display-pointer reconciliation interval for the host display (seconds).
///
/// The host is the thing being pointed at, so it follows pointer changes
/// quickly.
pub const POINTER_POLL_HOST_SECS: u64 = 3;

/// Display-pointer reconciliation interval for linked devices (seconds).
pub const POINTER_POLL_LINKED_SECS: u64 = 30;

/// How often the setup screen re-fetches its code (seconds).
///
/// Well under the 45-second refresh floor, so the displayed code is always
/// one the server still considers claimable.
pub const CODE_REFRESH_SECS: u64 = 30;

/// Live-feed refetch interval while a game is selected (seconds).
pub const FEED_POLL_SECS: u64 = 20;

/// Day-schedule refetch interval (seconds).
pub const SCHEDULE_POLL_SECS: u64 = 1_200;
