//! DOM rendering of the cake.
//!
//! Each candle is `<div class="candle">` (plus `out` once blown out),
//! absolutely positioned inside `.cake`, holding a `<div class="flame">`.
//! Slot `i` always corresponds to store index `i`; a candle that failed to
//! render keeps an empty slot.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::cake::CandleRecord;
use crate::controller::CakeView;
use crate::diag;

pub struct DomView {
    document: Document,
    cake: Element,
    count: Option<Element>,
    candles: Vec<Option<Element>>,
}

impl DomView {
    pub fn new(document: Document, cake: Element, count: Option<Element>) -> Self {
        Self { document, cake, count, candles: Vec::new() }
    }

    fn build_candle(&self, candle: &CandleRecord) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name("candle");
        if candle.extinguished {
            el.class_list().add_1("out")?;
        }
        let style = el.dyn_ref::<HtmlElement>().ok_or("candle is not an HtmlElement")?.style();
        style.set_property("left", &format!("{}px", candle.x))?;
        style.set_property("top", &format!("{}px", candle.y))?;

        let flame = self.document.create_element("div")?;
        flame.set_class_name("flame");
        el.append_child(&flame)?;
        self.cake.append_child(&el)?;
        Ok(el)
    }

    fn push_slot(&mut self, built: Result<Element, JsValue>) {
        match built {
            Ok(el) => self.candles.push(Some(el)),
            Err(e) => {
                diag::warn(&format!("could not render candle {}: {:?}", self.candles.len(), e));
                self.candles.push(None);
            }
        }
    }
}

impl CakeView for DomView {
    fn add_candle(&mut self, candle: &CandleRecord) {
        let built = self.build_candle(candle);
        self.push_slot(built);
    }

    fn extinguish(&mut self, index: usize) {
        if let Some(Some(el)) = self.candles.get(index) {
            if let Err(e) = el.class_list().add_1("out") {
                diag::warn(&format!("could not mark candle {} out: {:?}", index, e));
            }
        }
    }

    fn clear(&mut self) {
        for el in self.candles.drain(..).flatten() {
            el.remove();
        }
    }

    fn set_active_count(&mut self, count: usize) {
        if let Some(readout) = &self.count {
            readout.set_text_content(Some(&count.to_string()));
        }
    }
}
