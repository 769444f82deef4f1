//! In-memory candle collection — the source of truth for rendering and
//! counting.

/// One candle: integer pixel position on the cake and whether it is out.
///
/// Identity is the index in the store. `extinguished` only ever goes from
/// `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleRecord {
    pub x: i32,
    pub y: i32,
    pub extinguished: bool,
}

impl CandleRecord {
    pub fn lit(x: i32, y: i32) -> Self {
        Self { x, y, extinguished: false }
    }
}

/// Uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Ordered candle records for the lifetime of the page.
#[derive(Debug, Clone, Default)]
pub struct CandleStore {
    records: Vec<CandleRecord>,
}

impl CandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: i32, y: i32, extinguished: bool) {
        self.records.push(CandleRecord { x, y, extinguished });
    }

    /// Replace the whole collection (used when loading from the address).
    pub fn replace(&mut self, records: Vec<CandleRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[CandleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of candles still lit.
    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|c| !c.extinguished).count()
    }

    /// Run one Bernoulli trial with parameter `probability` per lit candle
    /// and blow out the ones that hit.
    ///
    /// Returns the indices of the candles that went out in this call, in
    /// store order. Already-extinguished candles are never touched and do
    /// not consume a random draw.
    pub fn extinguish_random_subset(
        &mut self,
        probability: f64,
        rng: &mut dyn RandomSource,
    ) -> Vec<usize> {
        let p = probability.clamp(0.0, 1.0);
        let mut changed = Vec::new();
        for (i, candle) in self.records.iter_mut().enumerate() {
            if candle.extinguished {
                continue;
            }
            if rng.next_f64() < p {
                candle.extinguished = true;
                changed.push(i);
            }
        }
        changed
    }

    /// Drop every candle. There is no undo.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
