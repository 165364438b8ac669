//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// couponload: drive hello-world and coupon issuance traffic against a coupon service
#[derive(Parser, Debug)]
#[command(name = "couponload")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress progress output and logs below error)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a load test against the target host
    Run(RunArgs),

    /// List registered scenarios
    List(ListArgs),

    /// Probe the target's /hello endpoint once
    Check(CheckArgs),
}

/// Arguments for the run command
///
/// Flags override values from `--config`.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// YAML run configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the target service
    #[arg(long, env = "COUPONLOAD_HOST")]
    pub host: Option<String>,

    /// Number of simulated users
    #[arg(short, long)]
    pub users: Option<usize>,

    /// Run length (e.g. 30s, 2m, 1h; 0 = iteration-bounded)
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Per-user invocation cap
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Base seed for per-user random sources
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scenario to run (repeatable; users are assigned round-robin)
    #[arg(short, long = "scenario")]
    pub scenarios: Vec<String>,

    /// Connection timeout in seconds
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Network (full response) timeout in seconds
    #[arg(long)]
    pub network_timeout: Option<u64>,

    /// Skip the pre-flight /hello probe
    #[arg(long)]
    pub no_health_check: bool,

    /// Report format on stdout
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,

    /// Write the JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append a Markdown row per scenario to this history file
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Base URL of the target service
    #[arg(long, env = "COUPONLOAD_HOST", default_value = "http://localhost:8080")]
    pub host: String,

    /// Connection timeout in seconds
    #[arg(long, default_value = "10")]
    pub connect_timeout: u64,

    /// Network (full response) timeout in seconds
    #[arg(long, default_value = "10")]
    pub network_timeout: u64,
}

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Markdown table
    Markdown,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}
