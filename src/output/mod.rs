mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

pub use self::manifest::Manifest;

use crate::config::OutputConfig;
use crate::error::{Result, SweepError};
use crate::signal_processing::{ExpSweep, SweepPair};
use crate::wav::save_wav;

/// Paths written by [`SweepWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub sweep: PathBuf,
    pub inverse: PathBuf,
    pub manifest: Option<PathBuf>,
}

/// Persists a generated sweep pair as two mono WAV files.
///
/// Generation and persistence are separate steps: a failed write leaves the
/// already computed [`SweepPair`] untouched and reports [`SweepError::Io`],
/// [`SweepError::Wav`] or [`SweepError::Manifest`].
pub struct SweepWriter {
    config: OutputConfig,
}

impl SweepWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn write(&self, ess: &ExpSweep, pair: &SweepPair) -> Result<WrittenFiles> {
        fs::create_dir_all(&self.config.dir)?;

        let sample_rate = ess.parameters().sample_rate();
        let sweep = self.config.sweep_path();
        let inverse = self.config.inverse_path();

        write_wav(&sweep, &pair.sweep, sample_rate)?;
        write_wav(&inverse, &pair.inverse, sample_rate)?;

        let manifest = if self.config.manifest {
            let path = self.config.manifest_path();
            let manifest = Manifest::new(ess, pair, &self.config);
            fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
            log::info!("Manifest written to {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(WrittenFiles {
            sweep,
            inverse,
            manifest,
        })
    }
}

fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    save_wav(path, samples, sample_rate).map_err(|source| SweepError::Wav {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Wrote {} samples at {} Hz to {}",
        samples.len(),
        sample_rate,
        path.display()
    );
    Ok(())
}
