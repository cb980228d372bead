//! Configuration for the ESS generator.
//!
//! Values come from three layers, lowest priority first: built-in defaults,
//! an optional TOML file, and command-line flags.
//!
//! ```toml
//! [sweep]
//! duration = 10.0     # seconds (alias: T)
//! start_freq = 125    # Hz, or "125hz" (alias: f1)
//! end_freq = "4khz"   # (alias: f2)
//! sample_rate = 48000 # (alias: fs)
//! debug = false
//!
//! [output]
//! dir = "measurements"
//! manifest = true
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ParameterError, Result, SweepError};
use crate::signal_processing::SweepParameters;

/// Frequency in Hz
///
/// # Parsing formats
/// - `125` - frequency in Hz (no suffix)
/// - `125hz` or `125Hz` - frequency in Hz (explicit)
/// - `4k` or `4kHz` - frequency in kHz
///
/// # Example
/// ```
/// use expsweep::config::Frequency;
///
/// let freq: Frequency = "4khz".parse().unwrap();
/// assert_eq!(freq.as_hz(), 4000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "FrequencyValue")]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();

        let (num, scale) = if let Some(num) = lower
            .strip_suffix("khz")
            .or_else(|| lower.strip_suffix('k'))
        {
            (num, 1000.0)
        } else {
            (lower.strip_suffix("hz").unwrap_or(lower.as_str()), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        let hz = value * scale;
        if !hz.is_finite() || hz <= 0.0 {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self::from_hz(hz))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrequencyValue {
    Number(f64),
    Text(String),
}

impl TryFrom<FrequencyValue> for Frequency {
    type Error = String;

    fn try_from(value: FrequencyValue) -> std::result::Result<Self, Self::Error> {
        match value {
            // Numeric values pass through unchecked; range checks happen in SweepParameters.
            FrequencyValue::Number(hz) => Ok(Self::from_hz(hz)),
            FrequencyValue::Text(s) => s.parse(),
        }
    }
}

/// Top-level configuration
///
/// # Example
/// ```
/// use expsweep::config::EssConfig;
///
/// let mut config = EssConfig::default();
/// config.sweep.duration = 5.0;
/// let params = config.sweep.parameters().unwrap();
/// assert_eq!(params.sample_rate(), 48000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EssConfig {
    /// Sweep generation parameters
    pub sweep: SweepConfig,
    /// Where and how results are persisted
    pub output: OutputConfig,
}

/// Sweep generation parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Sweep duration in seconds
    #[serde(alias = "T")]
    pub duration: f64,
    /// Start frequency
    #[serde(alias = "f1")]
    pub start_freq: Frequency,
    /// End frequency
    #[serde(alias = "f2")]
    pub end_freq: Frequency,
    /// Sample rate in Hz
    #[serde(alias = "fs")]
    pub sample_rate: u32,
    /// Show the sweep and inverse filter after generation
    pub debug: bool,
}

impl SweepConfig {
    /// Validate into parameters accepted by the generator
    pub fn parameters(&self) -> std::result::Result<SweepParameters, ParameterError> {
        SweepParameters::new(
            self.duration,
            self.start_freq.as_hz(),
            self.end_freq.as_hz(),
            self.sample_rate,
        )
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            start_freq: Frequency::from_hz(125.0),
            end_freq: Frequency::from_hz(4000.0),
            sample_rate: 48000,
            debug: false,
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving all output files (created if missing)
    pub dir: PathBuf,
    /// File name of the sweep WAV
    pub sweep_file: String,
    /// File name of the inverse filter WAV
    pub inverse_file: String,
    /// Also write manifest.json describing the generated pair
    pub manifest: bool,
}

impl OutputConfig {
    pub fn sweep_path(&self) -> PathBuf {
        self.dir.join(&self.sweep_file)
    }

    pub fn inverse_path(&self) -> PathBuf {
        self.dir.join(&self.inverse_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }
}

pub const MANIFEST_FILE: &str = "manifest.json";

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            sweep_file: "sweep.wav".to_string(),
            inverse_file: "inv_sweep.wav".to_string(),
            manifest: false,
        }
    }
}

impl EssConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SweepError::Config(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SweepError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_from_hz() {
        let freq: Frequency = "125".parse().unwrap();
        assert_eq!(freq.as_hz(), 125.0);
    }

    #[test]
    fn test_frequency_from_hz_explicit() {
        let freq: Frequency = "125hz".parse().unwrap();
        assert_eq!(freq.as_hz(), 125.0);

        let freq: Frequency = "125 Hz".parse().unwrap();
        assert_eq!(freq.as_hz(), 125.0);
    }

    #[test]
    fn test_frequency_from_khz() {
        let freq: Frequency = "4kHz".parse().unwrap();
        assert_eq!(freq.as_hz(), 4000.0);

        let freq: Frequency = "1.5k".parse().unwrap();
        assert_eq!(freq.as_hz(), 1500.0);
    }

    #[test]
    fn test_frequency_invalid() {
        assert!("abc".parse::<Frequency>().is_err());
        assert!("-100hz".parse::<Frequency>().is_err());
        assert!("0".parse::<Frequency>().is_err());
        assert!("khz".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = EssConfig::default();
        assert_eq!(config.sweep.duration, 10.0);
        assert_eq!(config.sweep.start_freq.as_hz(), 125.0);
        assert_eq!(config.sweep.end_freq.as_hz(), 4000.0);
        assert_eq!(config.sweep.sample_rate, 48000);
        assert!(!config.sweep.debug);
        assert_eq!(config.output.sweep_path(), PathBuf::from("./sweep.wav"));
        assert_eq!(config.output.inverse_path(), PathBuf::from("./inv_sweep.wav"));
    }

    #[test]
    fn test_toml_partial_override() {
        let config = EssConfig::from_toml_str(
            r#"
            [sweep]
            duration = 2
            end_freq = "8khz"
            debug = true

            [output]
            dir = "out"
            manifest = true
            "#,
        )
        .unwrap();

        assert_eq!(config.sweep.duration, 2.0);
        assert_eq!(config.sweep.start_freq.as_hz(), 125.0);
        assert_eq!(config.sweep.end_freq.as_hz(), 8000.0);
        assert!(config.sweep.debug);
        assert_eq!(config.output.sweep_path(), PathBuf::from("out/sweep.wav"));
        assert!(config.output.manifest);
    }

    #[test]
    fn test_toml_short_aliases() {
        let config = EssConfig::from_toml_str(
            r#"
            [sweep]
            T = 1.0
            f1 = 100
            f2 = 200
            fs = 1000
            "#,
        )
        .unwrap();

        let params = config.sweep.parameters().unwrap();
        assert_eq!(params.duration(), 1.0);
        assert_eq!(params.start_freq(), 100.0);
        assert_eq!(params.end_freq(), 200.0);
        assert_eq!(params.sample_rate(), 1000);
    }

    #[test]
    fn test_toml_unknown_key_rejected() {
        let err = EssConfig::from_toml_str("[sweep]\nbitdepth = 16\n").unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation_not_parsing() {
        let config = EssConfig::from_toml_str("[sweep]\nf1 = 0\n").unwrap();
        assert_eq!(
            config.sweep.parameters(),
            Err(ParameterError::NonPositiveStartFrequency(0.0))
        );
    }
}
