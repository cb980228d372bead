use std::f64::consts::TAU;

use super::TimeGrid;
use crate::error::{ParameterError, Result};

/// Longest supported sweep in samples: the largest data chunk a mono 32-bit
/// float WAV file can hold.
pub const MAX_SAMPLES: usize = (u32::MAX / 4) as usize;

/// Validated inputs for an exponential sine sweep.
///
/// Construction enforces `duration > 0`, `0 < start_freq < end_freq`,
/// `sample_rate > 0`, at most [`MAX_SAMPLES`] samples, and finite sweep
/// constants; every `SweepParameters` value can be generated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParameters {
    duration: f64,
    start_freq: f64,
    end_freq: f64,
    sample_rate: u32,
}

impl SweepParameters {
    /// Validate sweep inputs
    ///
    /// # Arguments
    /// * `duration` - Sweep length in seconds
    /// * `start_freq` - Start frequency in Hz
    /// * `end_freq` - End frequency in Hz
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(
        duration: f64,
        start_freq: f64,
        end_freq: f64,
        sample_rate: u32,
    ) -> std::result::Result<Self, ParameterError> {
        require_finite("duration", duration)?;
        require_finite("start frequency", start_freq)?;
        require_finite("end frequency", end_freq)?;

        if duration <= 0.0 {
            return Err(ParameterError::NonPositiveDuration(duration));
        }
        if start_freq <= 0.0 {
            return Err(ParameterError::NonPositiveStartFrequency(start_freq));
        }
        if end_freq <= start_freq {
            return Err(ParameterError::InvalidFrequencyRange {
                start: start_freq,
                end: end_freq,
            });
        }
        if sample_rate == 0 {
            return Err(ParameterError::ZeroSampleRate);
        }

        let requested = (duration * sample_rate as f64).floor();
        if requested > MAX_SAMPLES as f64 {
            return Err(ParameterError::TooManySamples {
                requested,
                max: MAX_SAMPLES,
            });
        }

        // The phase peaks at t = T, so a finite end phase bounds every sample.
        let (time_constant, phase_scale) = sweep_constants(duration, start_freq, end_freq);
        let end_phase = phase_scale * ((duration / time_constant).exp() - 1.0);
        if !(time_constant.is_finite() && time_constant > 0.0)
            || !phase_scale.is_finite()
            || !end_phase.is_finite()
        {
            return Err(ParameterError::UnrepresentableSweep {
                start: start_freq,
                end: end_freq,
                duration,
            });
        }

        Ok(Self {
            duration,
            start_freq,
            end_freq,
            sample_rate,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start_freq(&self) -> f64 {
        self.start_freq
    }

    pub fn end_freq(&self) -> f64 {
        self.end_freq
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Time constant `L` and phase scale `K` for a sweep.
fn sweep_constants(duration: f64, start_freq: f64, end_freq: f64) -> (f64, f64) {
    let w1 = TAU * start_freq;
    let w2 = TAU * end_freq;
    let log_ratio = (w2 / w1).ln();
    (duration / log_ratio, duration * w1 / log_ratio)
}

fn require_finite(name: &'static str, value: f64) -> std::result::Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}

/// A generated sweep and its matched inverse filter, both of length `floor(T * fs)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPair {
    /// Excitation signal, bounded to [-1, 1]
    pub sweep: Vec<f64>,
    /// Time-reversed, envelope-compensated sweep. Not range-bounded.
    pub inverse: Vec<f64>,
}

impl SweepPair {
    pub fn len(&self) -> usize {
        self.sweep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sweep.is_empty()
    }
}

/// Exponential sine sweep generator
///
/// The instantaneous frequency rises exponentially from `start_freq` to
/// `end_freq` over the sweep duration:
///
/// ```text
/// w1 = 2*pi*f1, w2 = 2*pi*f2
/// L  = T / ln(w2/w1)
/// K  = T * w1 / ln(w2/w1)
/// sweep[i]   = sin(K * (exp(t_i / L) - 1))
/// inverse[i] = sweep[N-1-i] / exp(t_i / L)
/// ```
///
/// The inverse filter divides the *reversed* sweep by the *forward* envelope,
/// which removes the sweep's rising energy density when convolved with a
/// recorded response.
///
/// # Example
/// ```
/// use expsweep::signal_processing::{ExpSweep, SweepParameters};
///
/// let params = SweepParameters::new(1.0, 100.0, 200.0, 1000).unwrap();
/// let pair = ExpSweep::new(params).generate();
/// assert_eq!(pair.len(), 1000);
/// assert_eq!(pair.sweep[0], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExpSweep {
    params: SweepParameters,
    grid: TimeGrid,
    time_constant: f64,
    phase_scale: f64,
}

impl ExpSweep {
    pub fn new(params: SweepParameters) -> Self {
        let (time_constant, phase_scale) =
            sweep_constants(params.duration, params.start_freq, params.end_freq);
        let grid = TimeGrid::new(params.duration, params.sample_rate);

        log::debug!(
            "ESS: T={}s f1={}Hz f2={}Hz fs={}Hz -> N={} L={:.6} K={:.6}",
            params.duration,
            params.start_freq,
            params.end_freq,
            params.sample_rate,
            grid.len(),
            time_constant,
            phase_scale
        );
        warn_on_degenerate(&params, &grid);

        Self {
            params,
            grid,
            time_constant,
            phase_scale,
        }
    }

    pub fn parameters(&self) -> &SweepParameters {
        &self.params
    }

    pub fn time_grid(&self) -> TimeGrid {
        self.grid
    }

    /// Time constant `L` of the exponential frequency rise, in seconds
    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// Phase scaling constant `K`, in radians
    pub fn phase_scale(&self) -> f64 {
        self.phase_scale
    }

    /// Envelope `G[i] = exp(t_i / L)`, strictly increasing in `i`
    pub fn envelope(&self) -> Vec<f64> {
        self.grid
            .iter()
            .map(|t| (t / self.time_constant).exp())
            .collect()
    }

    pub fn sweep(&self) -> Vec<f64> {
        self.grid
            .iter()
            .map(|t| (self.phase_scale * ((t / self.time_constant).exp() - 1.0)).sin())
            .collect()
    }

    pub fn inverse_filter(&self) -> Vec<f64> {
        inverse_of(&self.sweep(), &self.envelope())
    }

    pub fn generate(&self) -> SweepPair {
        let sweep = self.sweep();
        let inverse = inverse_of(&sweep, &self.envelope());
        SweepPair { sweep, inverse }
    }
}

// Reversed numerator, forward-indexed denominator.
fn inverse_of(sweep: &[f64], envelope: &[f64]) -> Vec<f64> {
    sweep
        .iter()
        .rev()
        .zip(envelope)
        .map(|(s, g)| s / g)
        .collect()
}

fn warn_on_degenerate(params: &SweepParameters, grid: &TimeGrid) {
    let product = params.duration * params.sample_rate as f64;
    if product.fract() != 0.0 {
        log::warn!(
            "duration * sample rate = {} is not integral; truncating to {} samples ({:.6}s)",
            product,
            grid.len(),
            grid.duration()
        );
    }
    if grid.len() < 2 {
        log::warn!("sweep has only {} sample(s)", grid.len());
    }

    let nyquist = params.sample_rate as f64 / 2.0;
    if params.end_freq > nyquist {
        log::warn!(
            "end frequency {}Hz exceeds Nyquist frequency {}Hz; the sweep will alias",
            params.end_freq,
            nyquist
        );
    }
}

/// Generate an exponential sine sweep and its inverse filter.
///
/// Returns `(sweep, inverse)`; fails with [`crate::SweepError::InvalidParameter`]
/// if `duration <= 0`, `start_freq <= 0`, `end_freq <= start_freq` or `sample_rate == 0`.
pub fn generate(
    duration: f64,
    start_freq: f64,
    end_freq: f64,
    sample_rate: u32,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let params = SweepParameters::new(duration, start_freq, end_freq, sample_rate)?;
    let SweepPair { sweep, inverse } = ExpSweep::new(params).generate();
    Ok((sweep, inverse))
}
