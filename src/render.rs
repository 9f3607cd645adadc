use gloo::timers::callback::Timeout;
use web_sys::{Document, Element};

use shinkeisuijaku_core::{
    effective_columns, tile_height_px, GameMode, LeaderboardSnapshot, LobbyStatus, StateBundle,
    Viewport,
};

pub(crate) const GRID_ID: &str = "grid";
const TILE_BACK: &str = "💠";
const TILE_PENDING: &str = "❔";
const MATCH_POP_MS: u32 = 220;
const LEADERBOARD_ROWS: usize = 10;
const LOBBY_CAPACITY: u32 = 10;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn element(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

fn set_text(id: &str, text: &str) {
    if let Some(el) = element(id) {
        el.set_text_content(Some(text));
    }
}

/// Wholesale repaint from one canonical snapshot. No diffing here; the grid,
/// HUD and leaderboard are cheap to rebuild and rebuilding is always correct.
pub(crate) fn render_board(
    state: &StateBundle,
    leaderboard: Option<&LeaderboardSnapshot>,
    overlay: Option<u32>,
    viewport: &Viewport,
) {
    render_grid(state, overlay, viewport);
    render_hud(state);
    if let Some(leaderboard) = leaderboard {
        render_leaderboard(leaderboard);
    }
}

fn render_grid(state: &StateBundle, overlay: Option<u32>, viewport: &Viewport) {
    let Some(document) = document() else {
        return;
    };
    let Some(grid) = document.get_element_by_id(GRID_ID) else {
        return;
    };
    let cols = effective_columns(state.board_cols(), viewport);
    let height = tile_height_px(viewport);
    let _ = grid.set_attribute(
        "style",
        &format!("grid-template-columns:repeat({cols}, 1fr)"),
    );

    grid.set_text_content(None);
    for (idx, face) in state.grid.faces.iter().enumerate() {
        let Ok(tile) = document.create_element("button") else {
            continue;
        };
        let _ = tile.set_attribute("data-idx", &idx.to_string());
        let _ = tile.set_attribute("style", &format!("height:{height}px"));
        if state.grid.is_matched(idx as u32) {
            tile.set_class_name("tile matched");
            tile.set_text_content(Some(face));
            let _ = tile.set_attribute("disabled", "");
        } else if !face.is_empty() {
            tile.set_class_name("tile revealed");
            tile.set_text_content(Some(face));
        } else if overlay == Some(idx as u32) {
            // optimistic: the symbol is unknown until the server answers
            tile.set_class_name("tile revealed pending");
            tile.set_text_content(Some(TILE_PENDING));
        } else {
            tile.set_class_name("tile hidden");
            tile.set_text_content(Some(TILE_BACK));
        }
        let _ = grid.append_child(&tile);
    }
}

fn render_hud(state: &StateBundle) {
    let lobby = &state.lobby;
    let player = &state.player;
    set_text(
        "status",
        &format!(
            "Status: {} • Players: {}/{} • Board: {}x{}",
            status_label(lobby.status),
            lobby.player_count,
            LOBBY_CAPACITY,
            lobby.rows,
            lobby.cols
        ),
    );
    set_text("score", &player.score.to_string());
    set_text("matches", &player.matches.to_string());
    set_text("misses", &player.misses.to_string());
    set_text("you", &format!("You: {}", player.name));
    set_text(
        "mode",
        match lobby.mode {
            GameMode::Teams => "Mode: Teams",
            GameMode::Solo => "Mode: Solo",
        },
    );
    set_text("hint", hint_for(lobby.status, player.finished));
}

fn status_label(status: LobbyStatus) -> &'static str {
    match status {
        LobbyStatus::Waiting => "waiting",
        LobbyStatus::Running => "running",
        LobbyStatus::Ended => "ended",
    }
}

fn hint_for(status: LobbyStatus, finished: bool) -> &'static str {
    match status {
        LobbyStatus::Waiting => "Waiting for host to start…",
        LobbyStatus::Ended => "Round ended.",
        LobbyStatus::Running if finished => "Board cleared! Waiting for the others…",
        LobbyStatus::Running => "Find matches!",
    }
}

fn render_leaderboard(leaderboard: &LeaderboardSnapshot) {
    let Some(document) = document() else {
        return;
    };
    let Some(container) = document.get_element_by_id("lb") else {
        return;
    };
    container.set_text_content(None);

    let Ok(table) = document.create_element("table") else {
        return;
    };
    table.set_class_name("tbl");
    append_row(
        &document,
        &table,
        "th",
        &["#", "Name", "Score", "Matches", "Misses"],
    );
    for (rank, entry) in leaderboard.players.iter().take(LEADERBOARD_ROWS).enumerate() {
        append_row(
            &document,
            &table,
            "td",
            &[
                &(rank + 1).to_string(),
                &entry.name,
                &entry.score.to_string(),
                &entry.matches.to_string(),
                &entry.misses.to_string(),
            ],
        );
    }
    let _ = container.append_child(&table);

    if leaderboard.teams.is_empty() {
        return;
    }
    let Ok(teams) = document.create_element("table") else {
        return;
    };
    teams.set_class_name("tbl teams");
    append_row(&document, &teams, "th", &["Team", "Score"]);
    for entry in &leaderboard.teams {
        append_row(&document, &teams, "td", &[&entry.name, &entry.score.to_string()]);
    }
    let _ = container.append_child(&teams);
}

fn append_row(document: &Document, table: &Element, cell_tag: &str, cells: &[&str]) {
    let Ok(row) = document.create_element("tr") else {
        return;
    };
    for text in cells {
        if let Ok(cell) = document.create_element(cell_tag) {
            // textContent only; entry names are player-controlled
            cell.set_text_content(Some(text));
            let _ = row.append_child(&cell);
        }
    }
    let _ = table.append_child(&row);
}

/// Flashes the pop animation on a freshly matched tile, once.
pub(crate) fn play_match_pop(idx: u32) {
    let Some(grid) = element(GRID_ID) else {
        return;
    };
    let selector = format!(".tile[data-idx=\"{idx}\"]");
    let Ok(Some(tile)) = grid.query_selector(&selector) else {
        return;
    };
    let _ = tile.class_list().add_1("match-pop");
    Timeout::new(MATCH_POP_MS, move || {
        let _ = tile.class_list().remove_1("match-pop");
    })
    .forget();
}
