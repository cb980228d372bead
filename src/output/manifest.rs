use serde::Serialize;

use crate::config::OutputConfig;
use crate::signal_processing::{ExpSweep, SweepPair, peak_abs};

/// Description of a generated sweep pair, written next to the WAV files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub duration: f64,
    pub start_freq: f64,
    pub end_freq: f64,
    pub sample_rate: u32,
    pub samples: usize,
    /// Time constant L in seconds
    pub time_constant: f64,
    /// Phase scaling constant K in radians
    pub phase_scale: f64,
    pub sweep_peak: f64,
    pub inverse_peak: f64,
    pub sweep_file: String,
    pub inverse_file: String,
}

impl Manifest {
    pub fn new(ess: &ExpSweep, pair: &SweepPair, output: &OutputConfig) -> Self {
        let params = ess.parameters();
        Self {
            duration: params.duration(),
            start_freq: params.start_freq(),
            end_freq: params.end_freq(),
            sample_rate: params.sample_rate(),
            samples: pair.len(),
            time_constant: ess.time_constant(),
            phase_scale: ess.phase_scale(),
            sweep_peak: peak_abs(&pair.sweep),
            inverse_peak: peak_abs(&pair.inverse),
            sweep_file: output.sweep_file.clone(),
            inverse_file: output.inverse_file.clone(),
        }
    }
}
