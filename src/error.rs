use std::path::PathBuf;

use thiserror::Error;

/// A violated precondition on the sweep parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("duration must be positive, got {0} s")]
    NonPositiveDuration(f64),

    #[error("start frequency must be positive, got {0} Hz")]
    NonPositiveStartFrequency(f64),

    #[error("end frequency ({end} Hz) must be greater than start frequency ({start} Hz)")]
    InvalidFrequencyRange { start: f64, end: f64 },

    #[error("sample rate must be positive")]
    ZeroSampleRate,

    #[error("{requested} samples requested, at most {max} are supported")]
    TooManySamples { requested: f64, max: usize },

    #[error(
        "sweep from {start} Hz to {end} Hz over {duration} s has no finite phase; narrow the range"
    )]
    UnrepresentableSweep { start: f64, end: f64, duration: f64 },
}

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Invalid sweep parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write WAV file {}: {source}", .path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plot error: {0}")]
    Plot(String),
}

impl SweepError {
    /// True when the error comes from rejected input rather than a collaborator failure.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SweepError::InvalidParameter(_))
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
