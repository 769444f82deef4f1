//! Runtime configuration.
//!
//! The page normally starts with the defaults. `start_with_config` accepts a
//! JSON object; any field it leaves out keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Query parameter that carries the candle token.
pub const DEFAULT_PARAM: &str = "candles";
/// Mean magnitude (0–255) above which the microphone counts as "blowing".
pub const DEFAULT_THRESHOLD: f64 = 40.0;
/// Analyser window size; yields `DEFAULT_FFT_SIZE / 2` frequency bins.
pub const DEFAULT_FFT_SIZE: u32 = 256;
/// Period of the blow-detection timer in milliseconds.
pub const DEFAULT_TICK_MS: i32 = 200;
/// Chance that each lit candle goes out on a loud tick.
pub const DEFAULT_BLOW_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeConfig {
    pub param: String,
    pub threshold: f64,
    pub fft_size: u32,
    pub tick_ms: i32,
    pub blow_probability: f64,
}

impl Default for CakeConfig {
    fn default() -> Self {
        Self {
            param: DEFAULT_PARAM.to_string(),
            threshold: DEFAULT_THRESHOLD,
            fft_size: DEFAULT_FFT_SIZE,
            tick_ms: DEFAULT_TICK_MS,
            blow_probability: DEFAULT_BLOW_PROBABILITY,
        }
    }
}

impl CakeConfig {
    /// Parse and validate a JSON config object. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: CakeConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.param.is_empty() {
            return Err(ConfigError::Invalid("param must not be empty".to_string()));
        }
        // AnalyserNode.fftSize only accepts powers of two in this range.
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(ConfigError::Invalid(format!(
                "fft_size must be a power of two in 32..=32768, got {}",
                self.fft_size
            )));
        }
        if !(self.blow_probability > 0.0 && self.blow_probability <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "blow_probability must be in (0, 1], got {}",
                self.blow_probability
            )));
        }
        if self.tick_ms <= 0 {
            return Err(ConfigError::Invalid(format!(
                "tick_ms must be positive, got {}",
                self.tick_ms
            )));
        }
        if !self.threshold.is_finite() {
            return Err(ConfigError::Invalid("threshold must be finite".to_string()));
        }
        Ok(())
    }

    /// Number of frequency bins the analyser reports.
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}
