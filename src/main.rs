use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use expsweep::ExpSweep;
use expsweep::config::{EssConfig, Frequency};
use expsweep::output::SweepWriter;
use expsweep::plot::create_visualizer;

#[derive(Parser, Debug)]
#[command(name = "expsweep")]
#[command(about = "Generate an exponential sine sweep and its inverse filter", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sweep duration in seconds [default: 10]
    #[arg(short, long, allow_negative_numbers = true)]
    duration: Option<f64>,

    /// Start frequency (e.g., "125", "125hz") [default: 125hz]
    #[arg(long)]
    start_freq: Option<Frequency>,

    /// End frequency (e.g., "4000", "4khz") [default: 4000hz]
    #[arg(long)]
    end_freq: Option<Frequency>,

    /// Sample rate in Hz [default: 48000]
    #[arg(short = 'r', long)]
    sample_rate: Option<u32>,

    /// Show the sweep and inverse filter before writing
    #[arg(long, overrides_with = "no_debug")]
    debug: bool,

    /// Do not show the sweep, even if the config file enables it
    #[arg(long, overrides_with = "debug")]
    no_debug: bool,

    /// Output directory [default: .]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Sweep file name [default: sweep.wav]
    #[arg(long)]
    sweep_file: Option<String>,

    /// Inverse filter file name [default: inv_sweep.wav]
    #[arg(long)]
    inverse_file: Option<String>,

    /// Write manifest.json next to the WAV files
    #[arg(long, overrides_with = "no_manifest")]
    manifest: bool,

    /// Do not write manifest.json, even if the config file enables it
    #[arg(long, overrides_with = "manifest")]
    no_manifest: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// `Some` when either side of an `--x` / `--no-x` pair was given
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn resolve_config(args: &Args) -> Result<EssConfig> {
    let mut config = if let Some(ref path) = args.config {
        EssConfig::from_toml_file(path).context("Failed to load config file")?
    } else {
        EssConfig::default()
    };

    if let Some(duration) = args.duration {
        config.sweep.duration = duration;
    }
    if let Some(freq) = args.start_freq {
        config.sweep.start_freq = freq;
    }
    if let Some(freq) = args.end_freq {
        config.sweep.end_freq = freq;
    }
    if let Some(rate) = args.sample_rate {
        config.sweep.sample_rate = rate;
    }
    if let Some(debug) = switch(args.debug, args.no_debug) {
        config.sweep.debug = debug;
    }

    if let Some(ref dir) = args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(ref name) = args.sweep_file {
        config.output.sweep_file = name.clone();
    }
    if let Some(ref name) = args.inverse_file {
        config.output.inverse_file = name.clone();
    }
    if let Some(manifest) = switch(args.manifest, args.no_manifest) {
        config.output.manifest = manifest;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    let params = config
        .sweep
        .parameters()
        .context("Invalid sweep parameters")?;

    let ess = ExpSweep::new(params);
    let pair = ess.generate();

    println!(
        "ESS: {} Hz -> {} Hz over {} s at {} Hz ({} samples)",
        params.start_freq(),
        params.end_freq(),
        params.duration(),
        params.sample_rate(),
        pair.len()
    );

    if config.sweep.debug {
        create_visualizer()
            .show(&ess.time_grid(), &pair)
            .context("Failed to display sweep")?;
    }

    let written = SweepWriter::new(config.output)
        .write(&ess, &pair)
        .context("Failed to write output files")?;

    println!("Sweep:          {}", written.sweep.display());
    println!("Inverse filter: {}", written.inverse.display());
    if let Some(manifest) = written.manifest {
        println!("Manifest:       {}", manifest.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("expsweep").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = resolve_config(&parse(&[])).unwrap();
        assert_eq!(config.sweep.duration, 10.0);
        assert_eq!(config.sweep.start_freq.as_hz(), 125.0);
        assert_eq!(config.sweep.end_freq.as_hz(), 4000.0);
        assert_eq!(config.sweep.sample_rate, 48000);
        assert!(!config.sweep.debug);
        assert!(!config.output.manifest);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "-d",
            "1",
            "--start-freq",
            "100hz",
            "--end-freq",
            "2khz",
            "-r",
            "8000",
            "--debug",
            "-o",
            "out",
            "--manifest",
        ]);
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.sweep.duration, 1.0);
        assert_eq!(config.sweep.start_freq.as_hz(), 100.0);
        assert_eq!(config.sweep.end_freq.as_hz(), 2000.0);
        assert_eq!(config.sweep.sample_rate, 8000);
        assert!(config.sweep.debug);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert!(config.output.manifest);
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("expsweep_cli_{}.toml", std::process::id()));
        std::fs::write(&path, "[sweep]\nduration = 3\nfs = 96000\n").unwrap();

        let args = parse(&["--config", path.to_str().unwrap(), "-d", "2"]);
        let config = resolve_config(&args).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.sweep.duration, 2.0);
        assert_eq!(config.sweep.sample_rate, 96000);
    }

    #[test]
    fn test_no_flags_switch_off_config_file_options() {
        let path =
            std::env::temp_dir().join(format!("expsweep_cli_off_{}.toml", std::process::id()));
        std::fs::write(&path, "[sweep]\ndebug = true\n\n[output]\nmanifest = true\n").unwrap();

        let from_file = resolve_config(&parse(&["--config", path.to_str().unwrap()])).unwrap();
        let switched_off = resolve_config(&parse(&[
            "--config",
            path.to_str().unwrap(),
            "--no-debug",
            "--no-manifest",
        ]))
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert!(from_file.sweep.debug);
        assert!(from_file.output.manifest);
        assert!(!switched_off.sweep.debug);
        assert!(!switched_off.output.manifest);
    }

    #[test]
    fn test_last_of_paired_flags_wins() {
        let args = parse(&["--debug", "--no-debug", "--no-manifest", "--manifest"]);
        assert!(!args.debug && args.no_debug);
        assert!(args.manifest && !args.no_manifest);
    }

    #[test]
    fn test_negative_duration_reaches_validation() {
        let config = resolve_config(&parse(&["-d", "-1"])).unwrap();
        assert!(config.sweep.parameters().is_err());
    }

    #[test]
    fn test_invalid_frequency_flag_rejected() {
        assert!(Args::try_parse_from(["expsweep", "--start-freq", "fast"]).is_err());
    }
}
