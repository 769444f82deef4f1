//! Cake state — the candle records, their token form and the address
//! parameter that carries it.
//!
//! Everything here is plain Rust with no browser dependency, so it is
//! tested natively.

pub mod address;
pub mod codec;
pub mod store;

pub use store::{CandleRecord, CandleStore};
