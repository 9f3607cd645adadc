use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use shinkeisuijaku_core::{
    ActionOutcome, Engine, EngineConfig, FxEvent, LobbyCode, PollOutcome, RenderPlan,
    SelectDecision, TickDecision,
};

use crate::session::{self, Session};
use crate::{boot, net, render, viewport};

const SCROLL_SETTLE_MS: u32 = 220;

/// Side-effect hook points for the surrounding shell (audio, confetti).
/// The engine only reports transitions; what they sound like is not its
/// business.
#[derive(Clone)]
pub(crate) struct FxHooks {
    pub(crate) on_fx: Rc<dyn Fn(FxEvent)>,
    pub(crate) on_session_end: Rc<dyn Fn()>,
}

impl FxHooks {
    pub(crate) fn empty() -> Self {
        Self {
            on_fx: Rc::new(|_| {}),
            on_session_end: Rc::new(|| {}),
        }
    }
}

/// Default terminal handling: drop the rejected token and hand over to the
/// join flow.
pub(crate) fn default_session_end(code: LobbyCode) -> Rc<dyn Fn()> {
    Rc::new(move || {
        session::clear_identity(&code);
        session::redirect_to_join();
    })
}

struct RuntimeState {
    engine: Engine,
    session: Option<Session>,
    hooks: FxHooks,
    ticker: Option<Interval>,
    listeners: Vec<EventListener>,
    scrolling: Rc<Cell<bool>>,
    scroll_settle: Option<Timeout>,
}

impl RuntimeState {
    fn new() -> Self {
        Self {
            engine: Engine::new(EngineConfig::desktop()),
            session: None,
            hooks: FxHooks::empty(),
            ticker: None,
            listeners: Vec::new(),
            scrolling: Rc::new(Cell::new(false)),
            scroll_settle: None,
        }
    }
}

thread_local! {
    static STATE: RefCell<RuntimeState> = RefCell::new(RuntimeState::new());
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub(crate) fn start(session: Session, hooks: FxHooks) {
    let config = if viewport::is_touch_device() {
        EngineConfig::touch()
    } else {
        EngineConfig::desktop()
    };
    STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        state.engine = Engine::new(config);
        state.session = Some(session);
        state.hooks = hooks;
    });
    boot::set_phase("syncing");
    install_ticker(config.poll_interval_ms);
    install_listeners();
    // first paint should not wait for the first interval tick
    if tick_decision() == TickDecision::Poll {
        spawn_poll();
    }
}

fn tick_decision() -> TickDecision {
    let now = now_ms();
    STATE.with(|slot| slot.borrow_mut().engine.on_tick(now))
}

fn install_ticker(interval_ms: u32) {
    let ticker = Interval::new(interval_ms, || {
        if tick_decision() == TickDecision::Poll {
            spawn_poll();
        }
    });
    STATE.with(|slot| {
        slot.borrow_mut().ticker = Some(ticker);
    });
}

fn install_listeners() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut listeners = Vec::new();

    listeners.push(EventListener::new(&window, "resize", |_| {
        refresh_now();
    }));

    // Redraws are skipped while the user is mid-scroll; a repaint under the
    // finger makes the page jump on mobile. The next poll repaints anyway.
    let scrolling = STATE.with(|slot| slot.borrow().scrolling.clone());
    listeners.push(EventListener::new(&window, "scroll", move |_| {
        scrolling.set(true);
        let scrolling = scrolling.clone();
        let settle = Timeout::new(SCROLL_SETTLE_MS, move || {
            scrolling.set(false);
        });
        STATE.with(|slot| {
            slot.borrow_mut().scroll_settle = Some(settle);
        });
    }));

    if let Some(grid) = window
        .document()
        .and_then(|document| document.get_element_by_id(render::GRID_ID))
    {
        listeners.push(EventListener::new(&grid, "click", |event| {
            if let Some(idx) = tile_index_from_event(event) {
                select_tile(idx);
            }
        }));
    } else {
        console::warn!("grid element missing; tile input disabled");
    }

    STATE.with(|slot| {
        slot.borrow_mut().listeners = listeners;
    });
}

fn tile_index_from_event(event: &web_sys::Event) -> Option<u32> {
    let target = event.target()?;
    let element: Element = target.dyn_into().ok()?;
    let tile = element.closest("[data-idx]").ok()??;
    tile.get_attribute("data-idx")?.parse().ok()
}

fn spawn_poll() {
    let Some(session) = STATE.with(|slot| slot.borrow().session.clone()) else {
        return;
    };
    spawn_local(async move {
        let outcome = match net::fetch_state(&session).await {
            Ok(response) => {
                if !response.ok {
                    PollOutcome::Rejected
                } else if let Some(state) = response.state {
                    PollOutcome::State {
                        state,
                        leaderboard: response.leaderboard,
                    }
                } else {
                    // ok but empty body counts as a transport hiccup
                    PollOutcome::Failed
                }
            }
            Err(err) => {
                console::warn!("state poll failed", err);
                PollOutcome::Failed
            }
        };
        handle_poll_result(outcome);
    });
}

fn handle_poll_result(outcome: PollOutcome) {
    let now = now_ms();
    let failed = matches!(outcome, PollOutcome::Failed);
    let (effect, hooks) = STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        let effect = state.engine.on_poll_result(now, outcome);
        (effect, state.hooks.clone())
    });

    if failed {
        boot::set_reconnecting(true);
    }
    if effect.session_ended {
        end_session(&hooks);
        return;
    }
    if let Some(plan) = effect.render {
        boot::ready();
        boot::set_reconnecting(false);
        finish_render(now, plan, &hooks);
    }
    if effect.follow_up_poll && tick_decision() == TickDecision::Poll {
        spawn_poll();
    }
}

pub(crate) fn select_tile(idx: u32) {
    let now = now_ms();
    let (decision, session) = STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        let decision = state.engine.on_tile_select(now, idx);
        (decision, state.session.clone())
    });
    if decision != SelectDecision::Submit {
        return;
    }
    // optimistic overlay first; the network round trip must not gate the
    // visual feedback
    render_current(now);
    let Some(session) = session else {
        return;
    };
    spawn_local(async move {
        let outcome = match net::post_flip(&session, idx).await {
            Ok(response) => {
                if response.ok {
                    match response.state {
                        Some(state) => ActionOutcome::State {
                            state,
                            leaderboard: response.leaderboard,
                        },
                        None => ActionOutcome::NoEffect,
                    }
                } else {
                    ActionOutcome::NoEffect
                }
            }
            Err(err) => {
                console::warn!("flip failed", err);
                ActionOutcome::Failed
            }
        };
        handle_action_result(outcome);
    });
}

fn handle_action_result(outcome: ActionOutcome) {
    let now = now_ms();
    let (effect, hooks) = STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        let effect = state.engine.on_action_result(now, outcome);
        (effect, state.hooks.clone())
    });
    if let Some(plan) = effect.render {
        // an authoritative flip response proves the transport is healthy
        boot::set_reconnecting(false);
        finish_render(now, plan, &hooks);
    }
}

/// Viewport changed: repaint with the new layout immediately, then ask for a
/// fresh snapshot through the normal gate.
pub(crate) fn refresh_now() {
    let now = now_ms();
    render_current(now);
    let decision = STATE.with(|slot| slot.borrow_mut().engine.on_refresh_request(now));
    if decision == TickDecision::Poll {
        spawn_poll();
    }
}

fn finish_render(now: f64, plan: RenderPlan, hooks: &FxHooks) {
    let scrolling = STATE.with(|slot| slot.borrow().scrolling.get());
    if !scrolling {
        render_current(now);
        for event in &plan.events {
            if let FxEvent::Match { idx } = event {
                render::play_match_pop(*idx);
            }
        }
    }
    for event in plan.events {
        (hooks.on_fx)(event);
    }
}

fn render_current(now: f64) {
    STATE.with(|slot| {
        let state = slot.borrow();
        let Some(current) = state.engine.current() else {
            return;
        };
        let overlay = state.engine.overlay_index(now);
        let viewport = viewport::current();
        render::render_board(current, state.engine.leaderboard(), overlay, &viewport);
    });
}

fn end_session(hooks: &FxHooks) {
    console::warn!("session rejected by server; returning to join");
    STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        state.ticker.take();
        state.listeners.clear();
    });
    boot::set_phase("ended");
    (hooks.on_session_end)();
}
