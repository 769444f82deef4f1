//! Interaction controller — keeps the candle store, the rendered cake and
//! the page address in step.
//!
//! Three independent inputs drive it: pointer clicks on the cake, the
//! blow-detection timer, and the explicit share/clear buttons. Each call
//! runs to completion before the next, so no locking is involved; the web
//! glue shares one controller behind `Rc<RefCell<_>>`.

use crate::audio::{AmplitudeDetector, FrequencySource};
use crate::cake::store::RandomSource;
use crate::cake::{CandleRecord, CandleStore, address, codec};
use crate::config::CakeConfig;
use crate::diag;
use crate::error::AudioError;

/// The page's address bar.
pub trait AddressBar {
    /// Current query string, including the leading `?` when non-empty.
    fn query(&self) -> String;
    /// Replace the query string in place, without navigating.
    fn replace_query(&mut self, query: &str);
    /// The full shareable address.
    fn href(&self) -> String;
}

/// The rendered cake.
pub trait CakeView {
    /// Draw a new candle at the end of the cake's candle list.
    fn add_candle(&mut self, candle: &CandleRecord);
    /// Mark the candle at `index` as blown out.
    fn extinguish(&mut self, index: usize);
    /// Remove every drawn candle.
    fn clear(&mut self);
    /// Update the lit-candle readout.
    fn set_active_count(&mut self, count: usize);
}

pub struct InteractionController<A, V, R> {
    config: CakeConfig,
    store: CandleStore,
    detector: AmplitudeDetector,
    address: A,
    view: V,
    rng: R,
}

impl<A: AddressBar, V: CakeView, R: RandomSource> InteractionController<A, V, R> {
    pub fn new(config: CakeConfig, address: A, view: V, rng: R) -> Self {
        let detector = AmplitudeDetector::inactive(config.threshold);
        Self { config, store: CandleStore::new(), detector, address, view, rng }
    }

    pub fn store(&self) -> &CandleStore {
        &self.store
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }

    pub fn address(&self) -> &A {
        &self.address
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    // ── Startup ────────────────────────────────────────────────────

    /// Populate the cake from the address. A missing or undecodable token
    /// means an empty cake; the address is left as it was.
    pub fn load(&mut self) {
        let query = self.address.query();
        let records = match address::get_param(&query, &self.config.param) {
            None => Vec::new(),
            Some(token) if token.trim().is_empty() => Vec::new(),
            Some(token) => match codec::decode(&token) {
                Ok(records) => records,
                Err(e) => {
                    diag::warn(&format!("Error loading candles from URL: {}", e));
                    Vec::new()
                }
            },
        };
        self.view.clear();
        for candle in &records {
            self.view.add_candle(candle);
        }
        self.store.replace(records);
        self.view.set_active_count(self.store.active_count());
        if !self.store.is_empty() {
            diag::info(&format!("restored {} candles from URL", self.store.len()));
        }
    }

    /// Hand the microphone acquisition result to the detector. Returns
    /// whether the timer path should be started.
    pub fn attach_microphone(
        &mut self,
        acquired: Result<Box<dyn FrequencySource>, AudioError>,
    ) -> bool {
        self.detector.initialize(acquired)
    }

    pub fn is_listening(&self) -> bool {
        self.detector.is_listening()
    }

    // ── Pointer path ───────────────────────────────────────────────

    /// Add a lit candle at a position relative to the cake's top-left
    /// corner. Sub-pixel precision is dropped.
    pub fn click(&mut self, x: f64, y: f64) {
        let candle = CandleRecord::lit(x as i32, y as i32);
        self.store.add(candle.x, candle.y, candle.extinguished);
        self.view.add_candle(&candle);
        self.view.set_active_count(self.store.active_count());
        self.persist();
    }

    // ── Timer path ─────────────────────────────────────────────────

    /// One blow-detection tick. Returns how many candles went out.
    pub fn tick(&mut self) -> usize {
        if !self.detector.is_loud() {
            return 0;
        }
        let changed = self
            .store
            .extinguish_random_subset(self.config.blow_probability, &mut self.rng);
        if changed.is_empty() {
            return 0;
        }
        for &index in &changed {
            self.view.extinguish(index);
        }
        self.view.set_active_count(self.store.active_count());
        self.persist();
        changed.len()
    }

    // ── Explicit actions ───────────────────────────────────────────

    /// Write the current candles into the address and return the address
    /// to put on the clipboard.
    pub fn share(&mut self) -> String {
        self.persist();
        self.address.href()
    }

    /// Remove every candle and strip the token from the address.
    pub fn clear(&mut self) {
        self.store.clear();
        self.view.clear();
        self.view.set_active_count(0);
        let query = address::without_param(&self.address.query(), &self.config.param);
        self.address.replace_query(&query);
    }

    /// Write the current token into the address.
    pub fn persist(&mut self) {
        let token = codec::encode(self.store.records());
        let query = address::with_param(&self.address.query(), &self.config.param, &token);
        self.address.replace_query(&query);
    }
}
