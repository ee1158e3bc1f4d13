use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "MTV-QUBO CLI - Formulate linker-assignment problems for multivariate porous materials as QUBOs and decode solver output.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the quadratic program and write it in LP format.
    Formulate(FormulateArgs),
    /// Decode a single solution bitstring into per-site linker assignments.
    Decode(DecodeArgs),
    /// Rank a sampled solver ensemble by probability.
    Rank(RankArgs),
}

/// Arguments shared by every command that loads a problem file.
#[derive(Args, Debug, Clone)]
pub struct ProblemArgs {
    /// Path to the problem definition in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub problem: PathBuf,

    /// Override the balance term weight from the problem file.
    #[arg(short = 'E', long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub balance_weight: Option<f64>,

    /// Override the composition term weight from the problem file.
    #[arg(long, value_name = "FLOAT")]
    pub composition_weight: Option<f64>,

    /// Override the occupancy term weight from the problem file.
    #[arg(long, value_name = "FLOAT")]
    pub occupancy_weight: Option<f64>,

    /// Set a specific configuration value, overriding the problem file and flags.
    /// Can be used multiple times. Example: -S penalties.balance=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `formulate` subcommand.
#[derive(Args, Debug)]
pub struct FormulateArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    /// Path for the LP output. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    /// Solution bitstring in variable order, e.g. 1001.
    #[arg(short, long, required = true, value_name = "BITS")]
    pub bits: String,
}

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    /// CSV file of sampled solutions with a `bitstring,probability` header.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub samples: PathBuf,

    /// Report only the N most probable configurations.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top: Option<usize>,
}
