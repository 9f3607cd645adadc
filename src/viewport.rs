use shinkeisuijaku_core::Viewport;

const LANDSCAPE_QUERY: &str = "(orientation: landscape)";

/// Reads the live viewport signals. Outside a browser (native tests) a wide
/// desktop viewport is assumed.
pub(crate) fn current() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport {
            width: 1024,
            height: 768,
            landscape: true,
        };
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1024.0) as u32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(768.0) as u32;
    let landscape = window
        .match_media(LANDSCAPE_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(width >= height);
    Viewport {
        width,
        height,
        landscape,
    }
}

/// Coarse device classing for poll cadence and quiet-window length.
pub(crate) fn is_touch_device() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(pointer: coarse)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}
