use crate::diff::{fx_events, FxEvent};
use crate::gate::{GateKind, InputGate};
use crate::snapshot::{LeaderboardSnapshot, LobbyStatus, StateBundle};
use crate::store::SnapshotStore;

pub const POLL_INTERVAL_DESKTOP_MS: u32 = 700;
pub const POLL_INTERVAL_TOUCH_MS: u32 = 1_000;
pub const QUIET_WINDOW_DESKTOP_MS: f64 = 450.0;
pub const QUIET_WINDOW_TOUCH_MS: f64 = 800.0;
/// An optimistic overlay the server never confirmed stops being drawn after
/// this long; the next canonical snapshot is already authoritative anyway.
pub const OVERLAY_TIMEOUT_MS: f64 = 4_000.0;
/// A flip whose response never lands re-enables input after this long so a
/// hung request cannot wedge the board.
pub const ACTION_COOLDOWN_MS: f64 = 900.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub poll_interval_ms: u32,
    pub quiet_window_ms: f64,
}

impl EngineConfig {
    pub fn desktop() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_DESKTOP_MS,
            quiet_window_ms: QUIET_WINDOW_DESKTOP_MS,
        }
    }

    /// Touch devices poll slower and protect the overlay longer; round trips
    /// feel slower there and a stale poll repainting mid-tap reads as a lost
    /// input.
    pub fn touch() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_TOUCH_MS,
            quiet_window_ms: QUIET_WINDOW_TOUCH_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickDecision {
    Skip,
    Poll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectDecision {
    Ignore,
    Submit,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PollOutcome {
    State {
        state: StateBundle,
        leaderboard: Option<LeaderboardSnapshot>,
    },
    /// `ok: false` from the state endpoint: the identity is gone.
    Rejected,
    /// Transport or parse failure; the last good view stays up.
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    State {
        state: StateBundle,
        leaderboard: Option<LeaderboardSnapshot>,
    },
    /// `ok: false` or no state in the flip response: the flip did nothing
    /// this round. Not an error and not terminal.
    NoEffect,
    Failed,
}

/// What the shell should repaint after a snapshot was applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderPlan {
    pub events: Vec<FxEvent>,
}

#[derive(Debug, Default)]
pub struct PollEffect {
    pub render: Option<RenderPlan>,
    /// Set exactly once per session, on the first rejection.
    pub session_ended: bool,
    /// A poll request was coalesced while this one ran; run one catch-up.
    pub follow_up_poll: bool,
}

#[derive(Debug, Default)]
pub struct ActionEffect {
    pub render: Option<RenderPlan>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingAction {
    idx: u32,
    submitted_at_ms: f64,
}

/// The state-synchronization engine. Every input is a discrete event
/// carrying the caller's clock, so the whole machine runs under test with a
/// hand-driven `now_ms` and no timers or network.
pub struct Engine {
    config: EngineConfig,
    store: SnapshotStore,
    gate: InputGate,
    quiet_until_ms: f64,
    overlay: Option<PendingAction>,
    action_started_ms: Option<f64>,
    terminated: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: SnapshotStore::new(),
            gate: InputGate::new(),
            quiet_until_ms: 0.0,
            overlay: None,
            action_started_ms: None,
            terminated: false,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn current(&self) -> Option<&StateBundle> {
        self.store.current()
    }

    pub fn leaderboard(&self) -> Option<&LeaderboardSnapshot> {
        self.store.leaderboard()
    }

    pub fn terminated(&self) -> bool {
        self.terminated
    }

    pub fn in_quiet_window(&self, now_ms: f64) -> bool {
        now_ms < self.quiet_until_ms
    }

    /// The optimistic overlay still worth drawing, if any.
    pub fn overlay_index(&self, now_ms: f64) -> Option<u32> {
        let pending = self.overlay?;
        if now_ms - pending.submitted_at_ms > OVERLAY_TIMEOUT_MS {
            return None;
        }
        Some(pending.idx)
    }

    /// Timer tick. Skips while terminated, inside the post-action quiet
    /// window, or while a poll is already in flight (which queues the single
    /// coalesced retry inside the gate).
    pub fn on_tick(&mut self, now_ms: f64) -> TickDecision {
        if self.terminated {
            return TickDecision::Skip;
        }
        if self.in_quiet_window(now_ms) {
            return TickDecision::Skip;
        }
        if !self.gate.try_acquire(GateKind::Poll) {
            return TickDecision::Skip;
        }
        TickDecision::Poll
    }

    /// Off-cycle "refresh now" (viewport change). Same gate, same quiet
    /// window as the timer path.
    pub fn on_refresh_request(&mut self, now_ms: f64) -> TickDecision {
        self.on_tick(now_ms)
    }

    pub fn on_poll_result(&mut self, now_ms: f64, outcome: PollOutcome) -> PollEffect {
        let retry_queued = self.gate.release(GateKind::Poll);
        let mut effect = PollEffect::default();
        match outcome {
            PollOutcome::Rejected => {
                if !self.terminated {
                    self.terminated = true;
                    effect.session_ended = true;
                }
            }
            PollOutcome::State { state, leaderboard } => {
                if !self.terminated {
                    effect.render = Some(self.apply_state(now_ms, state, leaderboard));
                }
                effect.follow_up_poll = retry_queued && !self.terminated;
            }
            PollOutcome::Failed => {
                effect.follow_up_poll = retry_queued && !self.terminated;
            }
        }
        effect
    }

    /// User gesture on grid position `idx`. Every precondition failure is a
    /// silent no-op; nothing reaches the network layer.
    pub fn on_tile_select(&mut self, now_ms: f64, idx: u32) -> SelectDecision {
        if self.terminated {
            return SelectDecision::Ignore;
        }
        let Some(current) = self.store.current() else {
            return SelectDecision::Ignore;
        };
        if current.lobby.status != LobbyStatus::Running {
            return SelectDecision::Ignore;
        }
        if idx as usize >= current.grid.faces.len() {
            return SelectDecision::Ignore;
        }
        if current.grid.face_up(idx as usize) {
            return SelectDecision::Ignore;
        }
        if self.overlay_index(now_ms) == Some(idx) {
            return SelectDecision::Ignore;
        }
        self.release_stuck_action(now_ms);
        if !self.gate.try_acquire(GateKind::Action) {
            return SelectDecision::Ignore;
        }
        self.overlay = Some(PendingAction {
            idx,
            submitted_at_ms: now_ms,
        });
        self.action_started_ms = Some(now_ms);
        self.quiet_until_ms = now_ms + self.config.quiet_window_ms;
        SelectDecision::Submit
    }

    pub fn on_action_result(&mut self, now_ms: f64, outcome: ActionOutcome) -> ActionEffect {
        self.gate.release(GateKind::Action);
        self.action_started_ms = None;
        let mut effect = ActionEffect::default();
        if self.terminated {
            return effect;
        }
        match outcome {
            ActionOutcome::State { state, leaderboard } => {
                // authoritative response; it supersedes the overlay
                self.overlay = None;
                effect.render = Some(self.apply_state(now_ms, state, leaderboard));
            }
            ActionOutcome::NoEffect | ActionOutcome::Failed => {
                // the overlay stays up; the next canonical snapshot settles it
            }
        }
        effect
    }

    fn apply_state(
        &mut self,
        now_ms: f64,
        state: StateBundle,
        leaderboard: Option<LeaderboardSnapshot>,
    ) -> RenderPlan {
        if let Some(pending) = self.overlay {
            let settled = !self.gate.is_held(GateKind::Action);
            let confirmed = state.grid.face_up(pending.idx as usize);
            let expired = now_ms - pending.submitted_at_ms > OVERLAY_TIMEOUT_MS;
            if settled || confirmed || expired {
                self.overlay = None;
            }
        }
        let events = fx_events(self.store.current(), &state);
        self.store.apply(state);
        self.store.apply_leaderboard(leaderboard);
        RenderPlan { events }
    }

    fn release_stuck_action(&mut self, now_ms: f64) {
        if !self.gate.is_held(GateKind::Action) {
            return;
        }
        let stuck = self
            .action_started_ms
            .map_or(true, |started| now_ms - started > ACTION_COOLDOWN_MS);
        if stuck {
            self.gate.release(GateKind::Action);
            self.action_started_ms = None;
        }
    }
}
