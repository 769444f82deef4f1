//! Browser glue — wires the DOM, the microphone, the clipboard and the
//! interval timer to an [`InteractionController`].
//!
//! The page script calls `start()` once the DOM is ready and keeps the
//! returned [`CakeApp`] for the share and clear buttons:
//!
//! ```text
//! const app = start();
//! shareButton.onclick = () => app.share();
//! clearButton.onclick = () => app.clear();
//! ```

pub mod clipboard;
pub mod dom;
pub mod location;
pub mod microphone;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MouseEvent, Window};

use crate::audio::FrequencySource;
use crate::cake::store::RandomSource;
use crate::config::CakeConfig;
use crate::controller::InteractionController;
use crate::diag;
use crate::share::{self, SHARE_ACK};

use clipboard::NavigatorClipboard;
use dom::DomView;
use location::LocationBar;

/// `Math.random()`.
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

type WebController = InteractionController<LocationBar, DomView, JsRandom>;

/// Handle returned to the page script.
#[wasm_bindgen]
pub struct CakeApp {
    window: Window,
    controller: Rc<RefCell<WebController>>,
}

#[wasm_bindgen]
impl CakeApp {
    /// Persist, copy the shareable address, then acknowledge.
    pub fn share(&self) {
        let href = self.controller.borrow_mut().share();
        let window = self.window.clone();
        spawn_local(async move {
            let clipboard = NavigatorClipboard::new(window.clone());
            share::copy_with_fallback(&clipboard, &href).await;
            if let Err(e) = window.alert_with_message(SHARE_ACK) {
                diag::warn(&format!("alert failed: {:?}", e));
            }
        });
    }

    /// Remove every candle and the token from the address.
    pub fn clear(&self) {
        self.controller.borrow_mut().clear();
    }

    pub fn active_count(&self) -> usize {
        self.controller.borrow().active_count()
    }

    pub fn candle_count(&self) -> usize {
        self.controller.borrow().store().len()
    }

    pub fn is_listening(&self) -> bool {
        self.controller.borrow().is_listening()
    }
}

/// Start with the default configuration.
#[wasm_bindgen]
pub fn start() -> Result<CakeApp, JsValue> {
    start_with_config("")
}

/// Start with a JSON configuration object; omitted fields keep defaults.
#[wasm_bindgen]
pub fn start_with_config(config_json: &str) -> Result<CakeApp, JsValue> {
    let config = CakeConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let cake = document
        .query_selector(".cake")?
        .ok_or("missing .cake element")?;
    let count = document.get_element_by_id("candleCount");

    let view = DomView::new(document, cake.clone(), count);
    let address = LocationBar::new(window.clone());
    let controller = Rc::new(RefCell::new(InteractionController::new(
        config.clone(),
        address,
        view,
        JsRandom,
    )));
    controller.borrow_mut().load();

    attach_click(&cake, controller.clone())?;
    start_microphone(window.clone(), config, controller.clone());

    Ok(CakeApp { window, controller })
}

fn attach_click(cake: &web_sys::Element, controller: Rc<RefCell<WebController>>) -> Result<(), JsValue> {
    let surface = cake.clone();
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let rect = surface.get_bounding_client_rect();
        let x = f64::from(event.client_x()) - rect.left();
        let y = f64::from(event.client_y()) - rect.top();
        controller.borrow_mut().click(x, y);
    }) as Box<dyn FnMut(MouseEvent)>);
    cake.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Ask for the microphone once. Only a granted request starts the timer;
/// a refusal leaves the page in click-only mode.
fn start_microphone(window: Window, config: CakeConfig, controller: Rc<RefCell<WebController>>) {
    spawn_local(async move {
        let acquired = microphone::acquire(&window, config.fft_size)
            .await
            .map(|a| Box::new(a) as Box<dyn FrequencySource>);
        if !controller.borrow_mut().attach_microphone(acquired) {
            return;
        }
        diag::info("microphone ready, listening for blows");
        let ticking = controller.clone();
        if let Err(e) = timer::every(&window, config.tick_ms, move || {
            ticking.borrow_mut().tick();
        }) {
            diag::warn(&format!("could not start blow timer: {:?}", e));
        }
    });
}
