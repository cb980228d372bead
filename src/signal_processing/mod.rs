pub mod math;
pub mod sweep;
pub mod time_grid;

pub use math::{amplitude_to_db, peak_abs, rms};
pub use sweep::{ExpSweep, MAX_SAMPLES, SweepPair, SweepParameters, generate};
pub use time_grid::TimeGrid;
