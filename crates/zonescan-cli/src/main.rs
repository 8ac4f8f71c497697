//! zonescan CLI — command-line interface for inhibition-zone measurement.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use zonescan::{
    Disk, EdgePolarity, MeasureConfig, NoTextRecognizer, ReviewSession, SkippedDisk, ZoneMeter,
    ZoneRecord,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "zonescan")]
#[command(about = "Measure antibiotic inhibition zones on disk-diffusion plate images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure inhibition zones in an image.
    Measure(CliMeasureArgs),

    /// Print the default configuration as JSON.
    DefaultConfig {
        /// Write to this path instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct CliMeasureArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write zone records (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Measurement configuration (JSON). Command-line overrides apply on top.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disks as a JSON array of `{"center": [x, y], "radius_px": r}`.
    /// Skips the built-in disk detector.
    #[arg(long)]
    disks: Option<PathBuf>,

    /// Physical antibiotic disk diameter in mm.
    #[arg(long)]
    disk_diameter_mm: Option<f64>,

    /// Maximum radius searched for the zone boundary (px).
    #[arg(long)]
    max_search_radius: Option<u32>,

    /// Stride between sampled rings (px).
    #[arg(long)]
    radius_step: Option<u32>,

    /// Fraction of the steepest step a boundary step must exceed.
    #[arg(long)]
    threshold_fraction: Option<f32>,

    /// Intensity change across the zone boundary in the enhanced image.
    #[arg(long, value_enum)]
    polarity: Option<PolarityArg>,

    /// Keep at most this many detected disks.
    #[arg(long)]
    max_disks: Option<usize>,

    /// Zone radius adjustment as ZONE=FACTOR (e.g. 0=1.2). Repeatable.
    #[arg(long = "adjust", value_parser = parse_adjustment)]
    adjustments: Vec<(usize, f32)>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolarityArg {
    DarkToLight,
    LightToDark,
}

impl PolarityArg {
    fn to_core(self) -> EdgePolarity {
        match self {
            Self::DarkToLight => EdgePolarity::DarkToLight,
            Self::LightToDark => EdgePolarity::LightToDark,
        }
    }
}

/// JSON written by `measure`.
#[derive(Debug, serde::Serialize)]
struct MeasureReport {
    image_size: [u32; 2],
    mm_per_px: f64,
    records: Vec<ZoneRecord>,
    skipped: Vec<SkippedDisk>,
}

fn parse_adjustment(s: &str) -> Result<(usize, f32), String> {
    let (index, factor) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ZONE=FACTOR, got '{}'", s))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid zone index '{}': {}", index, e))?;
    let factor = factor
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid factor '{}': {}", factor, e))?;
    Ok((index, factor))
}

fn build_measure_config(args: &CliMeasureArgs) -> CliResult<MeasureConfig> {
    let mut config = match &args.config {
        Some(path) => MeasureConfig::from_json_file(path)?,
        None => MeasureConfig::default(),
    };
    if let Some(d) = args.disk_diameter_mm {
        config.reference_disk_diameter_mm = d;
    }
    if let Some(r) = args.max_search_radius {
        config.sampling.max_search_radius_px = r;
    }
    if let Some(step) = args.radius_step {
        config.sampling.radius_step_px = step;
    }
    if let Some(f) = args.threshold_fraction {
        config.edge.threshold_fraction = f;
    }
    if let Some(p) = args.polarity {
        config.edge.polarity = p.to_core();
    }
    if args.max_disks.is_some() {
        config.disk_detect.max_disks = args.max_disks;
    }
    config.validate()?;
    Ok(config)
}

fn load_disks(path: &Path) -> CliResult<Vec<Disk>> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Measure(args) => run_measure(&args),
        Commands::DefaultConfig { out } => run_default_config(out.as_deref()),
    }
}

fn run_measure(args: &CliMeasureArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());

    let img = image::open(&args.image).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", args.image.display(), e).into()
    })?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();

    tracing::info!("Image size: {}x{}", w, h);

    let meter = ZoneMeter::with_config(build_measure_config(args)?);
    let measurement = match &args.disks {
        Some(path) => {
            let disks = load_disks(path)?;
            tracing::info!("{} disks loaded from {}", disks.len(), path.display());
            meter.measure_disks(&gray, disks, &NoTextRecognizer)?
        }
        None => meter.measure(&gray)?,
    };

    let mut session: ReviewSession = measurement.review_session();
    for &(index, factor) in &args.adjustments {
        let applied = session.set_factor(index, factor)?;
        tracing::info!("Zone {} adjusted by {:.2}", index, applied);
    }

    let records = measurement.records(&session);
    for r in &records {
        tracing::info!(
            "Disk {} at ({}, {}): zone {:.1} px, {:.2} mm [{}]",
            r.disk_index,
            r.center[0],
            r.center[1],
            r.adjusted_radius_px,
            r.diameter_mm,
            r.label
        );
    }
    for s in &measurement.skipped {
        tracing::warn!("Disk {} skipped: {}", s.disk_index, s.reason);
    }

    let report = MeasureReport {
        image_size: measurement.image_size,
        mm_per_px: measurement.scale.mm_per_px,
        records,
        skipped: measurement.skipped.clone(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    Ok(())
}

fn run_default_config(out: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&MeasureConfig::default())?;
    match out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Default config written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_parses_index_and_factor() {
        assert_eq!(parse_adjustment("2=1.5"), Ok((2, 1.5)));
        assert_eq!(parse_adjustment(" 0 = 0.8 "), Ok((0, 0.8)));
        assert!(parse_adjustment("1.5").is_err());
        assert!(parse_adjustment("x=1").is_err());
        assert!(parse_adjustment("1=big").is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from([
            "zonescan",
            "measure",
            "--image",
            "plate.png",
            "--out",
            "zones.json",
            "--radius-step",
            "1",
            "--polarity",
            "light-to-dark",
            "--adjust",
            "0=1.2",
            "--adjust",
            "3=0.5",
        ]);
        let Commands::Measure(args) = cli.command else {
            panic!("expected measure subcommand");
        };
        let cfg = build_measure_config(&args).unwrap();
        assert_eq!(cfg.sampling.radius_step_px, 1);
        assert_eq!(cfg.sampling.max_search_radius_px, 150);
        assert_eq!(cfg.edge.polarity, EdgePolarity::LightToDark);
        assert_eq!(args.adjustments, vec![(0, 1.2), (3, 0.5)]);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::parse_from([
            "zonescan",
            "measure",
            "--image",
            "plate.png",
            "--out",
            "zones.json",
            "--threshold-fraction",
            "0",
        ]);
        let Commands::Measure(args) = cli.command else {
            panic!("expected measure subcommand");
        };
        assert!(build_measure_config(&args).is_err());
    }
}
