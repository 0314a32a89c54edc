//! Shorekit CLI - Shoreline change analysis from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use shorekit_algorithms::intersection::intersect_transects;
use shorekit_algorithms::pipeline::{run_analysis, AnalysisParams};
use shorekit_algorithms::statistics::{shoreline_evolution, EvolutionParams};
use shorekit_algorithms::transects::{
    correct_transects, generate_transects, CorrectionParams, SeaSide, TransectParams,
};
use shorekit_core::io::{
    read_baselines, read_observations_csv, read_shorelines, read_transects,
    write_baseline_points_csv, write_metrics_csv, write_observations_csv,
    write_shoreline_points_csv, write_transects_csv, write_transects_geojson,
    DEFAULT_SHORELINE_ID_FIELD,
};
use shorekit_core::Warning;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "shorekit")]
#[command(author, version, about = "Shoreline change analysis along transects", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast transects along a baseline
    Generate {
        /// Baseline GeoJSON
        baseline: PathBuf,
        /// Output transects GeoJSON
        output: PathBuf,
        #[command(flatten)]
        transects: TransectArgs,
    },
    /// Repair transect orientations
    Correct {
        /// Transects GeoJSON
        transects: PathBuf,
        /// Output transects GeoJSON
        output: PathBuf,
        #[command(flatten)]
        correction: CorrectionArgs,
    },
    /// Intersect transects with the baseline and shorelines
    Intersect {
        /// Baseline GeoJSON
        baseline: PathBuf,
        /// Shorelines GeoJSON
        shorelines: PathBuf,
        /// Transects GeoJSON
        transects: PathBuf,
        /// Output directory
        out_dir: PathBuf,
        #[command(flatten)]
        shorelines_args: ShorelineArgs,
    },
    /// Compute evolution metrics from a distance table
    Analyze {
        /// Observations CSV (transect_id, shoreline_id, date, distance_from_base)
        observations: PathBuf,
        /// Output metrics CSV
        output: PathBuf,
        #[command(flatten)]
        evolution: EvolutionArgs,
    },
    /// Full analysis: generate, correct, intersect, analyze
    Run {
        /// Baseline GeoJSON
        baseline: PathBuf,
        /// Shorelines GeoJSON
        shorelines: PathBuf,
        /// Output directory
        out_dir: PathBuf,
        #[command(flatten)]
        transects: TransectArgs,
        #[command(flatten)]
        correction: CorrectionArgs,
        #[command(flatten)]
        shorelines_args: ShorelineArgs,
        #[command(flatten)]
        evolution: EvolutionArgs,
        /// Skip orientation correction
        #[arg(long)]
        no_correct: bool,
    },
}

#[derive(Args)]
struct TransectArgs {
    /// Distance between transects (map units)
    #[arg(short, long, default_value = "100")]
    spacing: f64,
    /// Transect length (map units)
    #[arg(short, long, default_value = "300")]
    length: f64,
    /// Side of the baseline the sea lies on, walking from its first vertex: left, right
    #[arg(long, default_value = "right")]
    sea_side: SeaSide,
    /// Baseline segments averaged for each transect bearing
    #[arg(short, long, default_value = "5")]
    window: usize,
}

impl From<TransectArgs> for TransectParams {
    fn from(args: TransectArgs) -> Self {
        Self {
            spacing: args.spacing,
            length: args.length,
            sea_side: args.sea_side,
            window: args.window,
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct CorrectionArgs {
    /// Largest accepted bearing change between neighbouring transects (degrees)
    #[arg(short, long, default_value = "15")]
    corr_factor: f64,
}

impl From<CorrectionArgs> for CorrectionParams {
    fn from(args: CorrectionArgs) -> Self {
        Self {
            corr_factor: args.corr_factor,
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct ShorelineArgs {
    /// Shoreline attribute holding the shoreline id
    #[arg(long, default_value = DEFAULT_SHORELINE_ID_FIELD)]
    shoreline_id_field: String,
}

#[derive(Args)]
struct EvolutionArgs {
    /// Days per year of the time axis
    #[arg(long, default_value = "365.24")]
    days_per_year: f64,
    /// Confidence level of the LRR interval
    #[arg(long, default_value = "0.95")]
    confidence: f64,
    /// Significance level used in the summary
    #[arg(long, default_value = "0.05")]
    alpha: f64,
}

impl EvolutionArgs {
    fn params(&self) -> EvolutionParams {
        EvolutionParams {
            days_per_year: self.days_per_year,
            confidence: self.confidence,
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default subscriber")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn report_warnings(warnings: &[Warning]) {
    if !warnings.is_empty() {
        warn!("{} warnings", warnings.len());
    }
}

fn prepare_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            baseline,
            output,
            transects,
        } => {
            let baselines = read_baselines(&baseline)
                .with_context(|| format!("Failed to read baseline {}", baseline.display()))?;
            let start = Instant::now();
            let set = generate_transects(&baselines, &transects.into())
                .context("Failed to generate transects")?;
            let elapsed = start.elapsed();
            info!("{} transects", set.transects.len());
            report_warnings(&set.warnings);
            write_transects_geojson(&output, &set.transects)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            done("Transects", &output, elapsed);
        }

        Commands::Correct {
            transects,
            output,
            correction,
        } => {
            let input = read_transects(&transects)
                .with_context(|| format!("Failed to read transects {}", transects.display()))?;
            let start = Instant::now();
            let report = correct_transects(input, &correction.into())
                .context("Failed to correct transects")?;
            let elapsed = start.elapsed();
            info!(
                "{} flipped, {} smoothed",
                report.flipped.len(),
                report.smoothed.len()
            );
            for (baseline_id, e) in &report.failures {
                warn!("baseline {:?} left uncorrected: {}", baseline_id.map(|b| b.0), e);
            }
            write_transects_geojson(&output, &report.transects)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            done("Corrected transects", &output, elapsed);
        }

        Commands::Intersect {
            baseline,
            shorelines,
            transects,
            out_dir,
            shorelines_args,
        } => {
            let baselines = read_baselines(&baseline)
                .with_context(|| format!("Failed to read baseline {}", baseline.display()))?;
            let shorelines = read_shorelines(&shorelines, &shorelines_args.shoreline_id_field)
                .with_context(|| format!("Failed to read shorelines {}", shorelines.display()))?;
            let transects = read_transects(&transects)
                .with_context(|| format!("Failed to read transects {}", transects.display()))?;

            let pb = spinner("Intersecting...");
            let start = Instant::now();
            let report = intersect_transects(&transects, &baselines, &shorelines)
                .context("Failed to intersect transects")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();
            report_warnings(&report.warnings);

            prepare_dir(&out_dir)?;
            write_baseline_points_csv(out_dir.join("baseline_points.csv"), &report.baseline_points)
                .context("Failed to write baseline points")?;
            write_shoreline_points_csv(
                out_dir.join("shoreline_points.csv"),
                &report.shoreline_points,
            )
            .context("Failed to write shoreline points")?;
            write_observations_csv(out_dir.join("observations.csv"), &report.observations)
                .context("Failed to write observations")?;
            done("Intersections", &out_dir, elapsed);
        }

        Commands::Analyze {
            observations,
            output,
            evolution,
        } => {
            let input = read_observations_csv(&observations).with_context(|| {
                format!("Failed to read observations {}", observations.display())
            })?;
            let start = Instant::now();
            let report = shoreline_evolution(&input, &[], &evolution.params())
                .context("Failed to compute evolution metrics")?;
            let elapsed = start.elapsed();
            info!(
                "{} transects, {} significant at {}",
                report.metrics.len(),
                report.significant_count(evolution.alpha),
                evolution.alpha
            );
            report_warnings(&report.warnings);
            write_metrics_csv(&output, &report.metrics)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            done("Metrics", &output, elapsed);
        }

        Commands::Run {
            baseline,
            shorelines,
            out_dir,
            transects,
            correction,
            shorelines_args,
            evolution,
            no_correct,
        } => {
            let baselines = read_baselines(&baseline)
                .with_context(|| format!("Failed to read baseline {}", baseline.display()))?;
            let shorelines = read_shorelines(&shorelines, &shorelines_args.shoreline_id_field)
                .with_context(|| format!("Failed to read shorelines {}", shorelines.display()))?;
            let params = AnalysisParams {
                transects: transects.into(),
                correction: correction.into(),
                evolution: evolution.params(),
                correct: !no_correct,
            };

            let pb = spinner("Analyzing shoreline change...");
            let start = Instant::now();
            let report = run_analysis(&baselines, &shorelines, &params)
                .context("Shoreline change analysis failed")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            prepare_dir(&out_dir)?;
            write_transects_geojson(out_dir.join("transects.geojson"), &report.transects)
                .context("Failed to write transects")?;
            write_transects_csv(out_dir.join("transects.csv"), &report.transects)
                .context("Failed to write transect table")?;
            write_baseline_points_csv(out_dir.join("baseline_points.csv"), &report.baseline_points)
                .context("Failed to write baseline points")?;
            write_shoreline_points_csv(
                out_dir.join("shoreline_points.csv"),
                &report.shoreline_points,
            )
            .context("Failed to write shoreline points")?;
            write_observations_csv(out_dir.join("observations.csv"), &report.observations)
                .context("Failed to write observations")?;
            write_metrics_csv(out_dir.join("metrics.csv"), &report.metrics)
                .context("Failed to write metrics")?;

            for (baseline_id, e) in &report.correction_failures {
                warn!("baseline {baseline_id:?} left uncorrected: {e}");
            }
            info!(
                "{} transects, {} warnings, {} significant at {}",
                report.transects.len(),
                report.warnings.len(),
                report.significant_count(evolution.alpha),
                evolution.alpha
            );
            done("Analysis", &out_dir, elapsed);
        }
    }

    Ok(())
}
