use crate::snapshot::{LeaderboardSnapshot, StateBundle};

/// Holds the latest canonical snapshot. Replacement is unconditional
/// (last-write-wins; the transport issues requests in order per caller) and
/// the displaced snapshot is handed back for diffing.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Option<StateBundle>,
    leaderboard: Option<LeaderboardSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, bundle: StateBundle) -> Option<StateBundle> {
        self.current.replace(bundle)
    }

    /// Keeps the last seen leaderboard when a response omits it.
    pub fn apply_leaderboard(&mut self, leaderboard: Option<LeaderboardSnapshot>) {
        if let Some(leaderboard) = leaderboard {
            self.leaderboard = Some(leaderboard);
        }
    }

    pub fn current(&self) -> Option<&StateBundle> {
        self.current.as_ref()
    }

    pub fn leaderboard(&self) -> Option<&LeaderboardSnapshot> {
        self.leaderboard.as_ref()
    }
}
