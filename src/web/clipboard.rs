//! `navigator.clipboard` with the off-screen `<textarea>` fallback.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlElement, HtmlTextAreaElement, Window};

use crate::error::ClipboardError;
use crate::share::Clipboard;

pub struct NavigatorClipboard {
    window: Window,
}

impl NavigatorClipboard {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn legacy(&self, text: &str) -> Result<bool, JsValue> {
        let document = self.window.document().ok_or("no document")?;
        let body: HtmlElement = document.body().ok_or("no body")?;
        let area: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
        area.set_value(text);
        let style = area.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", "-9999px")?;
        body.append_child(&area)?;
        area.select();
        let copied = document.dyn_into::<HtmlDocument>()?.exec_command("copy");
        area.remove();
        copied
    }
}

impl Clipboard for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let navigator = self.window.navigator();
        // Missing outside secure contexts; the binding assumes it exists.
        let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false);
        if !present {
            return Err(ClipboardError::Unavailable);
        }
        JsFuture::from(navigator.clipboard().write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))
    }

    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError> {
        match self.legacy(text) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::Rejected("execCommand(\"copy\") returned false".into())),
            Err(e) => Err(ClipboardError::Rejected(format!("{:?}", e))),
        }
    }
}
