//! Diagnostic views of a generated sweep pair.
//!
//! Visualizers only borrow the generated data, so showing a pair can never
//! change what the generator returned.

#[cfg(feature = "gui")]
mod gui;

#[cfg(feature = "gui")]
pub use self::gui::PlotWindow;

use crate::error::Result;
use crate::signal_processing::{SweepPair, TimeGrid, amplitude_to_db, peak_abs, rms};

pub const SWEEP_TITLE: &str = "ESS signal";
pub const INVERSE_TITLE: &str = "Inverse filter of ESS signal";

pub trait Visualizer {
    fn show(&mut self, grid: &TimeGrid, pair: &SweepPair) -> Result<()>;
}

/// Visualizer used for `debug = true`: a plot window when built with the
/// `gui` feature, otherwise a logged summary.
pub fn create_visualizer() -> Box<dyn Visualizer> {
    #[cfg(feature = "gui")]
    {
        Box::new(PlotWindow::default())
    }
    #[cfg(not(feature = "gui"))]
    {
        log::info!("built without the gui feature; debug output is a logged summary");
        Box::new(SummaryVisualizer)
    }
}

/// Per-signal statistics shown in place of a plot
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSummary {
    pub title: &'static str,
    pub samples: usize,
    pub duration: f64,
    pub peak: f64,
    pub rms: f64,
}

impl SignalSummary {
    pub fn new(title: &'static str, grid: &TimeGrid, samples: &[f64]) -> Self {
        Self {
            title,
            samples: samples.len(),
            duration: grid.duration(),
            peak: peak_abs(samples),
            rms: rms(samples),
        }
    }

    pub fn peak_db(&self) -> f64 {
        amplitude_to_db(self.peak)
    }
}

/// Logs length, peak and RMS of both signals at info level.
#[derive(Debug, Default)]
pub struct SummaryVisualizer;

impl Visualizer for SummaryVisualizer {
    fn show(&mut self, grid: &TimeGrid, pair: &SweepPair) -> Result<()> {
        for summary in [
            SignalSummary::new(SWEEP_TITLE, grid, &pair.sweep),
            SignalSummary::new(INVERSE_TITLE, grid, &pair.inverse),
        ] {
            log::info!(
                "{}: {} samples ({:.3}s), peak {:.4} ({:.1} dBFS), rms {:.4}",
                summary.title,
                summary.samples,
                summary.duration,
                summary.peak,
                summary.peak_db(),
                summary.rms
            );
        }
        Ok(())
    }
}

/// Reduce a signal to at most `max_points` `[time, value]` pairs for drawing.
///
/// Each bucket contributes its minimum and maximum so the envelope survives
/// decimation. `max_points` below 2 is raised to 2, the size of one bucket.
pub fn display_points(grid: &TimeGrid, samples: &[f64], max_points: usize) -> Vec<[f64; 2]> {
    let max_points = max_points.max(2);
    let buckets = max_points / 2;
    if samples.len() <= max_points {
        return samples
            .iter()
            .enumerate()
            .map(|(i, &v)| [grid.instant(i), v])
            .collect();
    }

    let bucket_len = samples.len().div_ceil(buckets);
    let mut points = Vec::with_capacity(buckets * 2);
    for (b, chunk) in samples.chunks(bucket_len).enumerate() {
        let start = b * bucket_len;
        let (mut min_i, mut max_i) = (0, 0);
        for (i, &v) in chunk.iter().enumerate() {
            if v < chunk[min_i] {
                min_i = i;
            }
            if v > chunk[max_i] {
                max_i = i;
            }
        }
        let (first, second) = if min_i <= max_i {
            (min_i, max_i)
        } else {
            (max_i, min_i)
        };
        points.push([grid.instant(start + first), chunk[first]]);
        points.push([grid.instant(start + second), chunk[second]]);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::{ExpSweep, SweepParameters};

    fn pair() -> (TimeGrid, SweepPair) {
        let ess = ExpSweep::new(SweepParameters::new(1.0, 100.0, 200.0, 1000).unwrap());
        (ess.time_grid(), ess.generate())
    }

    #[test]
    fn test_summary_visualizer_leaves_pair_untouched() {
        let (grid, pair) = pair();
        let before = pair.clone();

        let mut visualizer = SummaryVisualizer;
        visualizer.show(&grid, &pair).unwrap();

        assert_eq!(pair, before);
    }

    #[test]
    fn test_signal_summary() {
        let (grid, pair) = pair();
        let summary = SignalSummary::new(SWEEP_TITLE, &grid, &pair.sweep);

        assert_eq!(summary.samples, 1000);
        assert!((summary.duration - 1.0).abs() < 1e-12);
        assert!(summary.peak <= 1.0 && summary.peak > 0.9);
        assert!(summary.peak_db() <= 0.0);
        assert!(summary.rms > 0.5 && summary.rms < 0.8);
    }

    #[test]
    fn test_display_points_passthrough_when_short() {
        let grid = TimeGrid::new(0.004, 1000);
        let points = display_points(&grid, &[0.0, 1.0, -1.0, 0.5], 10);
        assert_eq!(
            points,
            vec![[0.0, 0.0], [0.001, 1.0], [0.002, -1.0], [0.003, 0.5]]
        );
    }

    #[test]
    fn test_display_points_minimum_is_one_bucket() {
        let (grid, pair) = pair();

        for max_points in [0, 1, 2] {
            let points = display_points(&grid, &pair.sweep, max_points);
            assert_eq!(points.len(), 2, "max_points = {}", max_points);
            let values = [points[0][1], points[1][1]];
            let max = pair.sweep.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min = pair.sweep.iter().cloned().fold(f64::INFINITY, f64::min);
            assert!(values.contains(&max) && values.contains(&min));
        }

        let single = display_points(&grid, &[0.25], 1);
        assert_eq!(single, vec![[0.0, 0.25]]);
    }

    #[test]
    fn test_display_points_keeps_extremes() {
        let (grid, pair) = pair();
        let points = display_points(&grid, &pair.inverse, 100);

        assert!(points.len() <= 100);
        let peak = points.iter().fold(0.0f64, |acc, p| acc.max(p[1].abs()));
        assert_eq!(peak, peak_abs(&pair.inverse));
        assert!(points.windows(2).all(|w| w[1][0] >= w[0][0]));
    }
}
