//! Game identifier newtype.
//!
//! Game ids come from the external stats provider (e.g. `"2022020211"`) and
//! are treated as opaque strings. The wrapper exists so a game id can never
//! be confused with a setup code or token in function signatures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a [`GameId`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameIdError {
    #[error("game id must not be empty")]
    Empty,
    #[error("game id must not contain whitespace")]
    Whitespace,
}

/// External identifier of a game as assigned by the stats provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Parse a game id from a string.
    ///
    /// # Errors
    ///
    /// Returns `GameIdError` if the input is empty or contains whitespace.
    pub fn parse(value: &str) -> Result<Self, GameIdError> {
        if value.is_empty() {
            return Err(GameIdError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(GameIdError::Whitespace);
        }
        Ok(Self(value.to_owned()))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_numeric_id() {
        let id = GameId::parse("2022020211").expect("valid id");
        assert_eq!(id.as_str(), "2022020211");
        assert_eq!(id.to_string(), "2022020211");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(GameId::parse(""), Err(GameIdError::Empty));
    }

    #[test]
    fn parse_rejects_whitespace() {
        assert_eq!(GameId::parse("2022 0202"), Err(GameIdError::Whitespace));
    }

    #[test]
    fn serializes_transparently() {
        let id = GameId::parse("2022020211").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"2022020211\"");
    }
}
