//! couponload CLI library
//!
//! Command-line front end for the couponload load-generation core.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{
    CheckArgs, Cli, ColorArg, Commands, ListArgs, LogFormatArg, ReportFormat, RunArgs,
};
pub use config::{CliConfig, ColorChoice, LogFormat, Verbosity};
pub use error::{CliError, CliResult};
