//! Core types for the scorebug link service.
//!
//! This module provides type-safe wrappers for the domain concepts shared
//! between the service and its test harnesses.

pub mod api;
pub mod credential;
pub mod game;

pub use api::{
    ClaimRequest, ClaimResponse, DisplayResponse, DisplayWriteRequest, LinkCompleteResponse,
    LinkStatusResponse, SessionResponse, SetupResponse,
};
pub use credential::LinkCredential;
pub use game::{GameId, GameIdError};
