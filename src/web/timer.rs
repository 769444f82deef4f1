//! Page-lifetime `setInterval`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Call `callback` every `period_ms` until the page unloads. The interval is
/// never cleared, so the closure is forgotten rather than stored.
pub fn every(window: &Window, period_ms: i32, callback: impl FnMut() + 'static) -> Result<i32, JsValue> {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        period_ms,
    )?;
    closure.forget();
    Ok(id)
}
