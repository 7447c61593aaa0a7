//! CLI argument parsing for comparo

use crate::statistics::PValueMethod;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for insight reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// p-value backend for the `ttest` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PValueArg {
    /// Fixed critical-value table (dashboard parity)
    Bucketed,
    /// Student's t distribution
    StudentT,
}

impl From<PValueArg> for PValueMethod {
    fn from(arg: PValueArg) -> Self {
        match arg {
            PValueArg::Bucketed => PValueMethod::Bucketed,
            PValueArg::StudentT => PValueMethod::StudentT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "comparo")]
#[command(version)]
#[command(about = "Statistical comparison and insights for prompt/completion datasets", long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate ranked insights from comparison metrics
    Insights(InsightsArgs),
    /// Align prompt and completion CSV datasets and print the alignment JSON
    Align(AlignArgs),
    /// Descriptive statistics for a list of numbers
    Describe(DescribeArgs),
    /// Welch's t-test and Cohen's d between two samples
    Ttest(TtestArgs),
}

/// Prompt CSV plus completion CSVs to align
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Prompt dataset CSV (input_id,input_text)
    #[arg(long, value_name = "CSV")]
    pub prompts: Option<PathBuf>,

    /// Completion dataset CSV (input_id,output_text); repeat for each dataset
    #[arg(long = "completions", value_name = "CSV", requires = "prompts")]
    pub completions: Vec<PathBuf>,

    /// Maximum number of aligned rows kept
    #[arg(long = "max-rows", value_name = "N", default_value = "200")]
    pub max_rows: usize,
}

#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// JSON file with an array of comparison metrics
    #[arg(long, value_name = "FILE")]
    pub metrics: Option<PathBuf>,

    /// JSON file with a precomputed alignment result
    #[arg(long, value_name = "FILE", conflicts_with = "prompts")]
    pub alignment: Option<PathBuf>,

    #[command(flatten)]
    pub datasets: DatasetArgs,

    /// Significance threshold (overrides the config file)
    #[arg(long, value_name = "P")]
    pub threshold: Option<f64>,

    /// TOML file with insight thresholds
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Append a per-metric interpretation section (text format only)
    #[arg(long)]
    pub interpret: bool,
}

#[derive(Args, Debug)]
pub struct AlignArgs {
    #[command(flatten)]
    pub datasets: DatasetArgs,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Sample values
    #[arg(value_name = "VALUE", num_args = 0.., allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TtestArgs {
    /// First sample, comma separated
    #[arg(long, value_name = "LIST", value_delimiter = ',', allow_negative_numbers = true)]
    pub a: Vec<f64>,

    /// Second sample, comma separated
    #[arg(long, value_name = "LIST", value_delimiter = ',', allow_negative_numbers = true)]
    pub b: Vec<f64>,

    /// p-value backend
    #[arg(long = "p-value", value_enum, default_value = "student-t")]
    pub p_value: PValueArg,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}
