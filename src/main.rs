#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod boot;
mod game_runtime;
mod net;
mod render;
mod session;
mod viewport;

#[cfg(target_arch = "wasm32")]
fn main() {
    use std::rc::Rc;

    boot::set_phase("boot");
    let Some(session) = session::load_session() else {
        // landed on /play without joining; the join flow owns identity
        session::redirect_to_join();
        return;
    };
    let hooks = game_runtime::FxHooks {
        // the shell swaps this for audio/confetti wiring
        on_fx: Rc::new(|_event| {}),
        on_session_end: game_runtime::default_session_end(session.code.clone()),
    };
    game_runtime::start(session, hooks);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {}
