//! Blow detection — a single mean-magnitude threshold over the
//! microphone's frequency bins.
//!
//! No smoothing or hysteresis: each sample is judged on its own.

use crate::diag;
use crate::error::AudioError;

/// Anything that can fill a buffer with byte frequency magnitudes (0–255).
pub trait FrequencySource {
    /// Number of frequency bins per sample.
    fn bin_count(&self) -> usize;
    /// Overwrite `bins` with the current magnitudes.
    fn sample(&mut self, bins: &mut [u8]);
}

/// Arithmetic mean of the magnitudes; `0.0` for no bins.
pub fn mean_magnitude(bins: &[u8]) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u64 = bins.iter().map(|&b| u64::from(b)).sum();
    sum as f64 / bins.len() as f64
}

enum DetectorState {
    Inactive,
    Listening {
        source: Box<dyn FrequencySource>,
        buffer: Vec<u8>,
    },
}

pub struct AmplitudeDetector {
    threshold: f64,
    state: DetectorState,
}

impl AmplitudeDetector {
    /// A detector with no input. Stays silent until initialised.
    pub fn inactive(threshold: f64) -> Self {
        Self { threshold, state: DetectorState::Inactive }
    }

    /// Take the outcome of microphone acquisition.
    ///
    /// Failure is logged and leaves the detector inactive for good; callers
    /// do not retry.
    pub fn initialize(&mut self, acquired: Result<Box<dyn FrequencySource>, AudioError>) -> bool {
        match acquired {
            Ok(source) => {
                let buffer = vec![0u8; source.bin_count()];
                self.state = DetectorState::Listening { source, buffer };
                true
            }
            Err(e) => {
                diag::warn(&format!("Unable to access microphone: {}", e));
                self.state = DetectorState::Inactive;
                false
            }
        }
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, DetectorState::Listening { .. })
    }

    /// Sample the input and report whether the mean magnitude is above the
    /// threshold. Always `false` while inactive.
    pub fn is_loud(&mut self) -> bool {
        match &mut self.state {
            DetectorState::Inactive => false,
            DetectorState::Listening { source, buffer } => {
                source.sample(buffer);
                mean_magnitude(buffer) > self.threshold
            }
        }
    }
}
