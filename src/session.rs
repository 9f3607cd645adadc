use shinkeisuijaku_core::LobbyCode;
use web_sys::UrlSearchParams;

const PLAYER_KEY_PREFIX: &str = "shinkei.player.";
const JOIN_PATH: &str = "/join";

/// Identity for one lobby: the code from the URL and the opaque player token
/// minted at join time. Immutable for the session; losing the token ends it.
#[derive(Clone, Debug)]
pub(crate) struct Session {
    pub(crate) code: LobbyCode,
    pub(crate) player_id: String,
}

pub(crate) fn player_key(code: &LobbyCode) -> String {
    format!("{PLAYER_KEY_PREFIX}{code}")
}

pub(crate) fn load_session() -> Option<Session> {
    let code = lobby_code_from_location()?;
    let storage = local_storage()?;
    let player_id = storage.get_item(&player_key(&code)).ok()??;
    let player_id = player_id.trim().to_string();
    if player_id.is_empty() {
        return None;
    }
    Some(Session { code, player_id })
}

/// Terminal: drops the rejected token and hands control back to the join
/// flow. Safe to call more than once.
pub(crate) fn clear_identity(code: &LobbyCode) {
    let Some(storage) = local_storage() else {
        return;
    };
    let _ = storage.remove_item(&player_key(code));
}

pub(crate) fn redirect_to_join() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let _ = window.location().set_href(JOIN_PATH);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// The lobby code comes from the play path (`/play/{code}`), with a
/// `?code=` query override for embedded launches.
fn lobby_code_from_location() -> Option<LobbyCode> {
    let window = web_sys::window()?;
    let location = window.location();
    if let Ok(search) = location.search() {
        if let Some(code) = code_from_query(&search) {
            return Some(code);
        }
    }
    let path = location.pathname().ok()?;
    code_from_path(&path)
}

fn code_from_query(search: &str) -> Option<LobbyCode> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    let raw = params.get("code")?;
    LobbyCode::parse(&raw).ok()
}

fn code_from_path(path: &str) -> Option<LobbyCode> {
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    LobbyCode::parse(segment).ok()
}
