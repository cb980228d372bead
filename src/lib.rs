pub mod config;
pub mod error;
pub mod output;
pub mod plot;
pub mod signal_processing;
pub mod wav;

pub use config::EssConfig;
pub use error::{ParameterError, Result, SweepError};
pub use signal_processing::{ExpSweep, SweepPair, SweepParameters, generate};
pub use wav::save_wav;
