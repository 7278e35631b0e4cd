//! Platform glue: URL query access and timezone detection.
//!
//! Web builds talk to the browser through `web-sys`; native builds keep the
//! same surface with sensible stand-ins so shared code never branches.

/// Query string from the current location, without the leading `?`.
/// `None` when empty or when no browser location exists (desktop).
#[cfg(target_arch = "wasm32")]
pub fn read_query_string() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let trimmed = search.trim_start_matches('?');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_query_string() -> Option<String> {
    None
}

/// Replace the current location's query string in place, without adding a
/// history entry. State flows one way: the URL is a write target after mount.
#[cfg(target_arch = "wasm32")]
pub fn write_query_string(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(path) = window.location().pathname() else {
        return;
    };
    let url = if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    };
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_query_string(_query: &str) {}

/// IANA timezone name for the runtime, e.g. `America/New_York`.
#[cfg(target_arch = "wasm32")]
pub fn local_timezone() -> String {
    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    js_sys::Reflect::get(&options, &wasm_bindgen::JsValue::from_str("timeZone"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| "UTC".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_timezone() -> String {
    std::env::var("TZ").unwrap_or_else(|_| "UTC".to_string())
}
