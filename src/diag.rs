//! Diagnostic logging.
//!
//! On wasm32 lines go to the browser console; natively (tests, tooling)
//! they go to stderr. Every line carries the `[cake]` tag so the page's
//! output is easy to filter in devtools.

const TAG: &str = "[cake]";

/// Log an informational line.
pub fn info(msg: &str) {
    emit(Level::Info, msg);
}

/// Log a recovered failure.
pub fn warn(msg: &str) {
    emit(Level::Warn, msg);
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Warn,
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, msg: &str) {
    let line = wasm_bindgen::JsValue::from_str(&format!("{} {}", TAG, msg));
    match level {
        Level::Info => web_sys::console::log_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, msg: &str) {
    match level {
        Level::Info => eprintln!("{} {}", TAG, msg),
        Level::Warn => eprintln!("{} warning: {}", TAG, msg),
    }
}
