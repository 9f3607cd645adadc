use crate::snapshot::StateBundle;

/// One-shot side effect derived from a snapshot transition. The shell maps
/// these to animation and audio; the engine only guarantees each fires once
/// per observed transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxEvent {
    Match { idx: u32 },
    Miss,
    Win,
}

/// Diffs two successive snapshots into edge-triggered events. Counters are
/// monotonic within a round, so comparing against the immediately previous
/// snapshot is enough; no seen-log is kept. The first snapshot of a session
/// has nothing to diff against and produces no events.
pub fn fx_events(previous: Option<&StateBundle>, current: &StateBundle) -> Vec<FxEvent> {
    let Some(previous) = previous else {
        return Vec::new();
    };
    let mut events = Vec::new();
    for idx in &current.grid.matched {
        if !previous.grid.is_matched(*idx) {
            events.push(FxEvent::Match { idx: *idx });
        }
    }
    if current.player.misses > previous.player.misses {
        events.push(FxEvent::Miss);
    }
    if current.player.finished && !previous.player.finished {
        events.push(FxEvent::Win);
    }
    events
}
