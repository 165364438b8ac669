//! couponload CLI: load tests for the coupon issuance service
//!
//! ## Usage
//!
//! ```bash
//! couponload list                                        # Show scenarios
//! couponload check --host http://localhost:8080          # Probe /hello
//! couponload run -s issue-coupon-async -u 100 -d 2m      # Run a load test
//! couponload run --config run.yaml --format json -o out.json
//! ```

use clap::Parser;
use couponload_cli::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, LogFormat,
    LogFormatArg, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    console::set_colors_enabled(config.color.should_color());
    logging::init_logging(&config)?;

    match cli.command {
        Commands::List(args) => handlers::list::execute_list(&args),
        Commands::Run(args) => {
            let rt = runtime()?;
            rt.block_on(handlers::run::execute_run(&config, &args))
        }
        Commands::Check(args) => {
            let rt = runtime()?;
            rt.block_on(handlers::check::execute_check(&config, &args))
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    let log_format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Json => LogFormat::Json,
    };

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
        .with_log_format(log_format)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::config(format!("Failed to create async runtime: {e}")))
}
