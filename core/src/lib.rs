pub mod diff;
pub mod engine;
pub mod gate;
pub mod layout;
pub mod protocol;
pub mod snapshot;
pub mod store;

pub use diff::{fx_events, FxEvent};
pub use engine::{
    ActionEffect, ActionOutcome, Engine, EngineConfig, PollEffect, PollOutcome, RenderPlan,
    SelectDecision, TickDecision,
};
pub use gate::{GateKind, InputGate};
pub use layout::{effective_columns, tile_height_px, Viewport};
pub use protocol::{
    is_valid_lobby_code, FlipRequest, LobbyCode, LobbyCodeError, StateResponse, LOBBY_CODE_ALPHABET,
    LOBBY_CODE_LEN,
};
pub use snapshot::{
    GameMode, GridSnapshot, LeaderboardEntry, LeaderboardSnapshot, LobbyStatus, LobbySummary,
    PlayerSnapshot, StateBundle, TeamEntry,
};
pub use store::SnapshotStore;
