//! Command-line surface: argument parsing and dispatch.
//!
//! Each subcommand is a thin collaborator around the core: it turns
//! arguments into a policy config, runs the adapters and the splitter,
//! prints a summary, and optionally exports the result to disk.

mod commands;

use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-dataset-split")]
#[command(about = "Prepare an image dataset: count, convert, and split into balanced groups")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count image files in a folder
    Count(CountArgs),
    /// Convert images from one container format to another
    Convert(ConvertArgs),
    /// Random ratio-based split (count-balanced only)
    SplitRatio(SplitRatioArgs),
    /// Fixed-count split balancing weight sums, with bounded retries
    SplitFixed(SplitFixedArgs),
    /// Greedy weight-balanced split, largest weights first
    SplitGreedy(SplitGreedyArgs),
}

#[derive(Args)]
pub struct CountArgs {
    pub folder: PathBuf,

    /// Count unique stems instead of files
    #[arg(long)]
    pub unique: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    pub folder: PathBuf,

    /// Source extension (e.g. png)
    #[arg(long)]
    pub from: String,

    /// Target extension (e.g. jpeg)
    #[arg(long)]
    pub to: String,

    /// Write converted files here instead of next to the originals
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Remove each original after a successful conversion
    #[arg(long)]
    pub replace: bool,
}

#[derive(Args)]
pub struct SplitRatioArgs {
    pub folder: PathBuf,

    /// Fraction of items assigned to train
    #[arg(long)]
    pub train: Option<f32>,

    /// Fraction of items assigned to val
    #[arg(long)]
    pub val: Option<f32>,

    /// Drop the remainder instead of keeping it as the test group
    #[arg(long)]
    pub drop_remainder: bool,

    /// Shuffle seed; omit for a non-reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extension precedence for stem dedup, best first (e.g. jpeg,png)
    #[arg(long, value_delimiter = ',')]
    pub prefer_ext: Vec<String>,

    /// Copy the groups into per-group folders under this directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SplitFixedArgs {
    pub folder: PathBuf,

    /// CSV feature file with one row per image
    #[arg(long)]
    pub features: PathBuf,

    /// Feature file column holding the image stem
    #[arg(long, default_value = "image")]
    pub id_column: String,

    /// Feature file column holding the weight
    #[arg(long, default_value = "points")]
    pub weight_column: String,

    /// Declared item count; must match the scanned collection
    #[arg(long)]
    pub expect_count: Option<usize>,

    /// Declared total weight; derived from the table when omitted
    #[arg(long)]
    pub total_weight: Option<f64>,

    /// Maximum allowed weight-sum difference between the groups
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Shuffle seed; omit for a non-reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attempts before giving up
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Extension precedence for stem dedup, best first
    #[arg(long, value_delimiter = ',')]
    pub prefer_ext: Vec<String>,

    /// Copy the groups into per-group folders under this directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SplitGreedyArgs {
    pub folder: PathBuf,

    /// CSV feature file; omit to weigh every image equally
    #[arg(long)]
    pub features: Option<PathBuf>,

    /// Feature file column holding the image stem
    #[arg(long, default_value = "image")]
    pub id_column: String,

    /// Feature file column holding the weight
    #[arg(long, default_value = "points")]
    pub weight_column: String,

    /// Group names in tie-break precedence order
    #[arg(long, value_delimiter = ',', default_value = "train,val")]
    pub groups: Vec<String>,

    /// Extension precedence for stem dedup, best first
    #[arg(long, value_delimiter = ',')]
    pub prefer_ext: Vec<String>,

    /// Copy the groups into per-group folders under this directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Count(args) => commands::count(&args),
        Command::Convert(args) => commands::convert(&args),
        Command::SplitRatio(args) => commands::split_ratio(&args),
        Command::SplitFixed(args) => commands::split_fixed(&args),
        Command::SplitGreedy(args) => commands::split_greedy(&args),
    }
}
