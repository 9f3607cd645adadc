use serde::{Deserialize, Serialize};

/// Lobby lifecycle as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LobbyStatus {
    Waiting,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Solo,
    Teams,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Solo
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbySummary {
    #[serde(default)]
    pub code: String,
    pub status: LobbyStatus,
    #[serde(default)]
    pub mode: GameMode,
    pub rows: u32,
    pub cols: u32,
    pub player_count: u32,
}

/// One player's view of the board. `faces[i]` holds the symbol when the tile
/// at position `i` is face-up and an empty string while it is face-down.
/// `matched` lists the positions permanently resolved; the server guarantees
/// every matched position is also face-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub faces: Vec<String>,
    #[serde(default)]
    pub matched: Vec<u32>,
    #[serde(default)]
    pub cols: u32,
}

impl GridSnapshot {
    pub fn face_up(&self, idx: usize) -> bool {
        self.faces.get(idx).map_or(false, |face| !face.is_empty())
    }

    pub fn is_matched(&self, idx: u32) -> bool {
        self.matched.contains(&idx)
    }
}

/// Per-round player counters. `matches` and `misses` never decrease within a
/// round and `finished` transitions false to true at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub misses: u32,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub misses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    #[serde(default)]
    pub score: i64,
}

/// Score-ordered standings, replaced wholesale on every poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    #[serde(default)]
    pub players: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

/// The complete server-issued state for one player at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateBundle {
    pub lobby: LobbySummary,
    pub grid: GridSnapshot,
    pub player: PlayerSnapshot,
}

impl StateBundle {
    /// Board column count; falls back to the lobby's when the grid omits it.
    pub fn board_cols(&self) -> u32 {
        if self.grid.cols > 0 {
            self.grid.cols
        } else {
            self.lobby.cols
        }
    }
}
