use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::{LeaderboardSnapshot, StateBundle};

pub const LOBBY_CODE_LEN: usize = 6;
pub const LOBBY_CODE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn is_valid_lobby_code(value: &str) -> bool {
    if value.len() != LOBBY_CODE_LEN {
        return false;
    }
    value.chars().all(|ch| LOBBY_CODE_ALPHABET.contains(ch))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LobbyCode(String);

impl LobbyCode {
    pub fn parse(value: &str) -> Result<Self, LobbyCodeError> {
        let value = value.trim().to_ascii_uppercase();
        if value.len() != LOBBY_CODE_LEN {
            return Err(LobbyCodeError::InvalidLength {
                expected: LOBBY_CODE_LEN,
                found: value.len(),
            });
        }
        for (idx, ch) in value.chars().enumerate() {
            if !LOBBY_CODE_ALPHABET.contains(ch) {
                return Err(LobbyCodeError::InvalidCharacter { ch, index: idx });
            }
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for LobbyCode {
    type Err = LobbyCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyCodeError {
    InvalidLength { expected: usize, found: usize },
    InvalidCharacter { ch: char, index: usize },
}

impl fmt::Display for LobbyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyCodeError::InvalidLength { expected, found } => {
                write!(f, "lobby code must be {expected} chars, got {found}")
            }
            LobbyCodeError::InvalidCharacter { ch, index } => {
                write!(f, "invalid character '{ch}' at position {index}")
            }
        }
    }
}

impl std::error::Error for LobbyCodeError {}

/// Envelope returned by both `GET /api/state/{code}/{player_id}` and
/// `POST /api/flip`. On the state endpoint `ok: false` means the identity is
/// invalid or expired and the session is over. On the flip endpoint `ok:
/// false` or a missing `state` means the flip had no visible effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<LeaderboardSnapshot>,
}

/// Body for `POST /api/flip`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlipRequest<'a> {
    pub code: &'a str,
    pub player_id: &'a str,
    pub idx: u32,
}
