//! iouscore: overlap and similarity metrics for boxes and masks.
//!
//! Scores how well a predicted region matches a reference region, for
//! axis-aligned bounding boxes and for binary masks. Each suite offers ten
//! overlap metrics (IoU and its generalized, distance, complete, efficient,
//! focal, SCYLLA, alpha, weighted and minimum-point-distance variants), and
//! masks additionally get pixel accuracy, Dice and Hausdorff distance.
//!
//! # Modules
//!
//! - [`geom`]: Region types (`BBoxXYXY`, `Coord`, `Mask`) and coordinate spaces
//! - [`metric`]: The metric selector, parameters and the shared [`OverlapKernel`] trait
//! - [`boxes`]: Box geometry kernel and box metrics
//! - [`masks`]: Mask geometry kernel and mask metrics
//! - [`pixel`]: Pixel accuracy, Dice coefficient and Hausdorff distance
//! - [`labels`]: Hand-off of mask pairs to an elementwise statistics facility
//! - [`score`]: All-metrics reports and parallel batch scoring
//! - [`io`]: Reading box pairs and mask pairs from CSV, JSON and YAML
//! - [`error`]: Error types for iouscore operations

pub mod boxes;
pub mod error;
pub mod geom;
pub mod io;
pub mod labels;
pub mod masks;
pub mod metric;
pub mod pixel;
pub mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

pub use error::IouScoreError;
pub use metric::{Metric, MetricParams, OverlapKernel};

use geom::{BBoxXYXY, Pixel};

/// The iouscore CLI application.
#[derive(Parser)]
#[command(name = "iouscore")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Score one pair of boxes.
    Boxes(BoxesArgs),
    /// Score a pair of masks read from a JSON or YAML file.
    Masks(MasksArgs),
    /// Score every box pair in a CSV, JSON or YAML file.
    Batch(BatchArgs),
}

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Metric parameter flags shared by every subcommand.
#[derive(clap::Args)]
struct ParamArgs {
    /// Focusing exponent of Focal-EIoU.
    #[arg(long, env = "IOUSCORE_GAMMA", default_value_t = 2.0)]
    gamma: f64,

    /// Exponent of Alpha-IoU.
    #[arg(long, env = "IOUSCORE_ALPHA", default_value_t = 0.5)]
    alpha: f64,

    /// Scale factor of WIoU.
    #[arg(long, env = "IOUSCORE_WEIGHT", default_value_t = 1.0)]
    weight: f64,
}

impl From<&ParamArgs> for MetricParams {
    fn from(args: &ParamArgs) -> Self {
        Self {
            gamma: args.gamma,
            alpha: args.alpha,
            weight: args.weight,
        }
    }
}

/// Arguments for the boxes subcommand.
#[derive(clap::Args)]
struct BoxesArgs {
    /// First box as 'x1,y1,x2,y2'.
    #[arg(long, value_parser = parse_box, allow_hyphen_values = true)]
    a: BBoxXYXY<Pixel>,

    /// Second box as 'x1,y1,x2,y2'.
    #[arg(long, value_parser = parse_box, allow_hyphen_values = true)]
    b: BBoxXYXY<Pixel>,

    /// Report a single metric instead of the full suite.
    #[arg(long, value_enum)]
    metric: Option<Metric>,

    #[command(flatten)]
    params: ParamArgs,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Arguments for the masks subcommand.
#[derive(clap::Args)]
struct MasksArgs {
    /// JSON or YAML file with `a` and `b` masks as nested row lists.
    input: PathBuf,

    /// Report a single overlap metric instead of the full report.
    #[arg(long, value_enum)]
    metric: Option<Metric>,

    #[command(flatten)]
    params: ParamArgs,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Arguments for the batch subcommand.
#[derive(clap::Args)]
struct BatchArgs {
    /// CSV, JSON or YAML file of box pairs.
    input: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// One metric's value, for `--metric` output.
#[derive(Serialize)]
struct SingleMetric {
    metric: Metric,
    value: f64,
}

impl std::fmt::Display for SingleMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {:.6}", self.metric.name(), self.value)
    }
}

/// Run the iouscore CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), IouScoreError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Boxes(args)) => run_boxes(args),
        Some(Commands::Masks(args)) => run_masks(args),
        Some(Commands::Batch(args)) => run_batch(args),
        None => {
            println!("iouscore {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Overlap and similarity metrics for boxes and masks.");
            println!();
            println!("Run 'iouscore --help' for usage information.");
            Ok(())
        }
    }
}

fn run_boxes(args: BoxesArgs) -> Result<(), IouScoreError> {
    let params = MetricParams::from(&args.params);
    debug!(a = %args.a, b = %args.b, ?params, "scoring boxes");

    match args.metric {
        Some(metric) => {
            let value = boxes::evaluate(&args.a, &args.b, metric, &params);
            emit(&SingleMetric { metric, value }, args.output)
        }
        None => emit(&score::score_boxes(&args.a, &args.b, &params), args.output),
    }
}

fn run_masks(args: MasksArgs) -> Result<(), IouScoreError> {
    let params = MetricParams::from(&args.params);
    let pair = io::read_mask_pair(&args.input)?;

    match args.metric {
        Some(metric) => {
            let value = masks::evaluate(&pair.a, &pair.b, metric, &params)?;
            emit(&SingleMetric { metric, value }, args.output)
        }
        None => emit(&score::score_mask_pair(&pair, &params)?, args.output),
    }
}

fn run_batch(args: BatchArgs) -> Result<(), IouScoreError> {
    let params = MetricParams::from(&args.params);
    let pairs = io::read_box_pairs(&args.input)?;
    let report = score::score_box_pairs(&pairs, &params);
    emit(&report, args.output)
}

fn emit<R>(report: &R, output: OutputFormat) -> Result<(), IouScoreError>
where
    R: Serialize + std::fmt::Display + ?Sized,
{
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|source| IouScoreError::JsonWrite { source })?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{report}"),
    }
    Ok(())
}

fn parse_box(raw: &str) -> Result<BBoxXYXY<Pixel>, String> {
    let coords = raw
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| format!("invalid coordinate '{}'", token.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    match coords.as_slice() {
        &[x1, y1, x2, y2] => Ok(BBoxXYXY::from_xyxy(x1, y1, x2, y2)),
        _ => Err(format!(
            "expected 4 comma-separated numbers 'x1,y1,x2,y2', got {}",
            coords.len()
        )),
    }
}

/// Fuzzing entrypoints, kept behind the `fuzzing` feature.
#[cfg(feature = "fuzzing")]
pub mod fuzz {
    pub use crate::io::{fuzz_score_box_pairs_csv, fuzz_score_mask_pair_json};
}
