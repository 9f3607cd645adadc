use shinkeisuijaku_core::{
    is_valid_lobby_code, FlipRequest, GameMode, LobbyCode, LobbyStatus, StateResponse,
};

#[test]
fn decodes_full_state_response() {
    let body = r#"{
        "ok": true,
        "state": {
            "lobby": {"code": "K7Q2ZD", "status": "running", "mode": "teams",
                      "rows": 4, "cols": 4, "player_count": 6},
            "grid": {"faces": ["", "🍒", "", "🍒"], "matched": [1, 3]},
            "player": {"id": "ab12", "name": "mina", "team": "red",
                       "score": 10, "matches": 1, "misses": 2, "finished": false}
        },
        "leaderboard": {
            "players": [
                {"name": "mina", "score": 10, "matches": 1, "misses": 2},
                {"name": "rio", "score": 0, "matches": 0, "misses": 4}
            ]
        }
    }"#;
    let response: StateResponse = serde_json::from_str(body).expect("decode");
    assert!(response.ok);
    let state = response.state.expect("state");
    assert_eq!(state.lobby.status, LobbyStatus::Running);
    assert_eq!(state.lobby.mode, GameMode::Teams);
    assert!(state.grid.face_up(1));
    assert!(!state.grid.face_up(0));
    assert!(state.grid.is_matched(3));
    assert_eq!(state.player.misses, 2);
    assert_eq!(state.board_cols(), 4);
    let leaderboard = response.leaderboard.expect("leaderboard");
    assert_eq!(leaderboard.players.len(), 2);
    assert_eq!(leaderboard.players[0].name, "mina");
    assert!(leaderboard.teams.is_empty());
}

#[test]
fn rejection_carries_no_state() {
    let response: StateResponse = serde_json::from_str(r#"{"ok": false}"#).expect("decode");
    assert!(!response.ok);
    assert!(response.state.is_none());
    assert!(response.leaderboard.is_none());
}

#[test]
fn lobby_without_mode_defaults_to_solo() {
    // the server omits mode and code on the per-player state endpoint
    let body = r#"{
        "ok": true,
        "state": {
            "lobby": {"status": "waiting", "rows": 4, "cols": 4, "player_count": 1},
            "grid": {"faces": ["", "", "", ""]},
            "player": {"name": "kei"}
        }
    }"#;
    let response: StateResponse = serde_json::from_str(body).expect("decode");
    let state = response.state.expect("state");
    assert_eq!(state.lobby.mode, GameMode::Solo);
    assert_eq!(state.lobby.code, "");
    assert!(state.grid.matched.is_empty());
    assert!(!state.player.finished);
}

#[test]
fn flip_request_serializes_to_the_wire_shape() {
    let request = FlipRequest {
        code: "K7Q2ZD",
        player_id: "ab12",
        idx: 7,
    };
    let body = serde_json::to_string(&request).expect("encode");
    assert_eq!(body, r#"{"code":"K7Q2ZD","player_id":"ab12","idx":7}"#);
}

#[test]
fn lobby_code_validation() {
    assert!(is_valid_lobby_code("K7Q2ZD"));
    assert!(!is_valid_lobby_code("K7Q2Z"));
    assert!(!is_valid_lobby_code("k7q2zd"));
    assert!(!is_valid_lobby_code("K7Q2Z!"));

    assert_eq!(LobbyCode::parse(" k7q2zd ").unwrap().as_str(), "K7Q2ZD");
    assert!(LobbyCode::parse("nope").is_err());
}
