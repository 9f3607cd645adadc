use shinkeisuijaku_core::{
    fx_events, FxEvent, GameMode, GridSnapshot, LobbyStatus, LobbySummary, PlayerSnapshot,
    StateBundle,
};

fn bundle(faces: &[&str], matched: &[u32], misses: u32, finished: bool) -> StateBundle {
    StateBundle {
        lobby: LobbySummary {
            code: "ABC123".to_string(),
            status: LobbyStatus::Running,
            mode: GameMode::Solo,
            rows: 2,
            cols: 2,
            player_count: 3,
        },
        grid: GridSnapshot {
            faces: faces.iter().map(|face| face.to_string()).collect(),
            matched: matched.to_vec(),
            cols: 0,
        },
        player: PlayerSnapshot {
            id: "p1".to_string(),
            name: "ayu".to_string(),
            team: None,
            score: 10 * matched.len() as i64 / 2,
            matches: matched.len() as u32 / 2,
            misses,
            finished,
        },
    }
}

#[test]
fn newly_matched_index_fires_once() {
    let previous = bundle(&["", "", "", ""], &[], 0, false);
    let current = bundle(&["", "", "", "A"], &[3], 0, false);
    let events = fx_events(Some(&previous), &current);
    assert_eq!(events, vec![FxEvent::Match { idx: 3 }]);
}

#[test]
fn identical_snapshots_produce_no_events() {
    let current = bundle(&["A", "", "", "A"], &[0, 3], 2, false);
    let events = fx_events(Some(&current.clone()), &current);
    assert!(events.is_empty());
}

#[test]
fn miss_increase_fires_once_then_never_again() {
    let previous = bundle(&["", "", "", ""], &[], 2, false);
    let current = bundle(&["", "", "", ""], &[], 3, false);
    assert_eq!(fx_events(Some(&previous), &current), vec![FxEvent::Miss]);
    // the same pair again observes no new transition
    assert!(fx_events(Some(&current.clone()), &current).is_empty());
}

#[test]
fn decreasing_misses_is_not_an_event() {
    // counters are monotonic per round; a decrease only appears across a
    // round reset and must not fire a miss
    let previous = bundle(&["", "", "", ""], &[], 3, false);
    let current = bundle(&["", "", "", ""], &[], 0, false);
    assert!(fx_events(Some(&previous), &current).is_empty());
}

#[test]
fn finish_transition_fires_win_once() {
    let previous = bundle(&["A", "B", "B", "A"], &[0, 1, 2, 3], 1, false);
    let current = bundle(&["A", "B", "B", "A"], &[0, 1, 2, 3], 1, true);
    assert_eq!(fx_events(Some(&previous), &current), vec![FxEvent::Win]);
    assert!(fx_events(Some(&current.clone()), &current).is_empty());
}

#[test]
fn first_snapshot_is_silent() {
    // joining a lobby mid-game must not replay every past match
    let current = bundle(&["A", "", "", "A"], &[0, 3], 5, true);
    assert!(fx_events(None, &current).is_empty());
}

#[test]
fn simultaneous_transitions_all_fire() {
    let previous = bundle(&["A", "", "", ""], &[], 0, false);
    let current = bundle(&["A", "B", "B", "A"], &[0, 1, 2, 3], 1, true);
    let events = fx_events(Some(&previous), &current);
    assert_eq!(
        events,
        vec![
            FxEvent::Match { idx: 0 },
            FxEvent::Match { idx: 1 },
            FxEvent::Match { idx: 2 },
            FxEvent::Match { idx: 3 },
            FxEvent::Miss,
            FxEvent::Win,
        ]
    );
}
