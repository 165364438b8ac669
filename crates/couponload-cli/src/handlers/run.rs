//! Handler for `couponload run`.

use crate::commands::{ReportFormat, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use couponload::{report, Harness, RunConfig, RunReport};
use indicatif::ProgressBar;
use std::time::Duration;
use tokio::sync::watch;

/// Merge the optional YAML file with command-line overrides.
pub fn build_run_config(args: &RunArgs) -> CliResult<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host.clone_from(host);
    }
    if let Some(users) = args.users {
        config.users = users;
    }
    if let Some(duration) = &args.duration {
        config.duration_secs = parse_duration(duration)?.as_secs();
    }
    if let Some(iterations) = args.iterations {
        config.iterations = Some(iterations);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if !args.scenarios.is_empty() {
        config.scenarios.clone_from(&args.scenarios);
    }
    if let Some(secs) = args.connect_timeout {
        config.timeouts.connect_secs = secs;
    }
    if let Some(secs) = args.network_timeout {
        config.timeouts.network_secs = secs;
    }
    if args.no_health_check {
        config.health_check = false;
    }

    config.validate()?;
    Ok(config)
}

/// Execute `couponload run`.
pub async fn execute_run(cli: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let config = build_run_config(args)?;
    let quiet = cli.verbosity.is_quiet();

    if !quiet {
        eprintln!(
            "Load testing {} (users={}, duration={}s, iterations={}, scenarios={})",
            config.base_url(),
            config.users,
            config.duration_secs,
            config
                .iterations
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
            config.scenarios.join(","),
        );
    }

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, no new requests will be scheduled");
            let _ = stop_tx.send(true);
        }
    });

    let spinner = (!quiet).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_message("running...");
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    });

    let harness = Harness::with_builtin(config);
    let result = harness.run_with_stop(stop_rx).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let run_report = result?;

    println!("{}", render(&run_report, args.format)?);

    if let Some(path) = &args.output {
        std::fs::write(path, report::to_json(&run_report)?)?;
        if !quiet {
            eprintln!("Results written to {}", path.display());
        }
    }

    if let Some(path) = &args.history {
        report::append_history(path, std::slice::from_ref(&run_report))?;
        if !quiet {
            eprintln!("Updated {}", path.display());
        }
    }

    Ok(())
}

/// Render a report in the requested stdout format.
pub fn render(run_report: &RunReport, format: ReportFormat) -> CliResult<String> {
    Ok(match format {
        ReportFormat::Text => report::render_text(run_report),
        ReportFormat::Json => report::to_json(run_report)?,
        ReportFormat::Markdown => report::to_markdown_table(std::slice::from_ref(run_report)),
    })
}

/// Parse a duration string like "30s", "2m", "1h".
fn parse_duration(s: &str) -> CliResult<Duration> {
    let s = s.trim();
    let invalid = || CliError::invalid_argument(format!("Invalid duration: {s}. Use 30s, 2m, or 1h"));
    let (digits, multiplier) = if let Some(secs) = s.strip_suffix('s') {
        (secs, 1)
    } else if let Some(mins) = s.strip_suffix('m') {
        (mins, 60)
    } else if let Some(hrs) = s.strip_suffix('h') {
        (hrs, 3600)
    } else {
        (s, 1)
    };
    let n: u64 = digits.parse().map_err(|_| invalid())?;
    let secs = n.checked_mul(multiplier).ok_or_else(invalid)?;
    Ok(Duration::from_secs(secs))
}
