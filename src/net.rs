use gloo::timers::future::TimeoutFuture;
use js_sys::Math;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use shinkeisuijaku_core::{FlipRequest, StateResponse};

use crate::session::Session;

// Debug latency injection, read per request so it can be flipped live from
// the console: localStorage.setItem("shinkei.debug.http_in_ms", "300")
const HTTP_DELAY_IN_KEY: &str = "shinkei.debug.http_in_ms";
const HTTP_DELAY_OUT_KEY: &str = "shinkei.debug.http_out_ms";
const HTTP_DELAY_JITTER_KEY: &str = "shinkei.debug.http_jitter_ms";

#[derive(Clone, Copy)]
struct HttpDelayConfig {
    inbound_ms: u32,
    outbound_ms: u32,
    jitter_ms: u32,
}

fn read_storage_u32(key: &str) -> Option<u32> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let raw = storage.get_item(key).ok()??;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u32>().ok()
}

fn load_http_delay_config() -> HttpDelayConfig {
    HttpDelayConfig {
        inbound_ms: read_storage_u32(HTTP_DELAY_IN_KEY).unwrap_or(0),
        outbound_ms: read_storage_u32(HTTP_DELAY_OUT_KEY).unwrap_or(0),
        jitter_ms: read_storage_u32(HTTP_DELAY_JITTER_KEY).unwrap_or(0),
    }
}

fn compute_delay_ms(base: u32, jitter: u32) -> u32 {
    if base == 0 && jitter == 0 {
        return 0;
    }
    let extra = if jitter == 0 {
        0
    } else {
        (Math::random() * jitter as f64).round() as u32
    };
    base.saturating_add(extra)
}

async fn outbound_delay() {
    let config = load_http_delay_config();
    let delay = compute_delay_ms(config.outbound_ms, config.jitter_ms);
    if delay > 0 {
        TimeoutFuture::new(delay).await;
    }
}

async fn inbound_delay() {
    let config = load_http_delay_config();
    let delay = compute_delay_ms(config.inbound_ms, config.jitter_ms);
    if delay > 0 {
        TimeoutFuture::new(delay).await;
    }
}

pub(crate) async fn fetch_state(session: &Session) -> Result<StateResponse, String> {
    let url = format!("/api/state/{}/{}", session.code, session.player_id);
    request_json("GET", &url, None).await
}

pub(crate) async fn post_flip(session: &Session, idx: u32) -> Result<StateResponse, String> {
    let body = serde_json::to_string(&FlipRequest {
        code: session.code.as_str(),
        player_id: &session.player_id,
        idx,
    })
    .map_err(|err| err.to_string())?;
    request_json("POST", "/api/flip", Some(body)).await
}

async fn request_json(
    method: &str,
    url: &str,
    body: Option<String>,
) -> Result<StateResponse, String> {
    outbound_delay().await;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }
    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| format!("bad request for {url}"))?;
    if method == "POST" {
        let _ = request.headers().set("Content-Type", "application/json");
    }

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| format!("fetch failed for {url}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch returned a non-response".to_string())?;
    if !response.ok() {
        return Err(format!("http {} for {url}", response.status()));
    }
    let text_promise = response
        .text()
        .map_err(|_| "response body unavailable".to_string())?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| "response body read failed".to_string())?;
    let text = text
        .as_string()
        .ok_or_else(|| "response body was not text".to_string())?;

    inbound_delay().await;

    serde_json::from_str(&text).map_err(|err| err.to_string())
}
