//! `window.location` + `history.replaceState` as an [`AddressBar`].

use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::controller::AddressBar;
use crate::diag;

pub struct LocationBar {
    window: Window,
}

impl LocationBar {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn replace(&self, query: &str) -> Result<(), JsValue> {
        let location = self.window.location();
        let url = format!("{}{}{}", location.pathname()?, query, location.hash()?);
        self.window
            .history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
    }
}

impl AddressBar for LocationBar {
    fn query(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn replace_query(&mut self, query: &str) {
        if let Err(e) = self.replace(query) {
            diag::warn(&format!("history.replaceState failed: {:?}", e));
        }
    }

    fn href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }
}
