//! Report rendering for load test runs.
//!
//! Produces a terminal summary, JSON, and Markdown, and can append rows to a
//! historical Markdown file so successive runs line up in one table.

use crate::error::LoadResult;
use crate::stats::{RunReport, ScenarioStats};
use std::path::Path;

/// Render a run as a human-readable summary.
pub fn render_text(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("LOAD TEST: {}\n", report.host));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    output.push_str(&format!("Users:        {}\n", report.users));
    output.push_str(&format!("Elapsed:      {:.1}s\n", report.elapsed_secs));
    output.push_str(&format!(
        "Requests:     {} ({} ok, {} failed, {:.1}% failure)\n",
        report.total_requests,
        report.successful,
        report.failed,
        report.failure_ratio() * 100.0
    ));
    output.push_str(&format!("Throughput:   {:.1} req/s\n", report.throughput_rps));

    for stats in &report.scenarios {
        output.push('\n');
        render_scenario(&mut output, stats);
    }

    output
}

fn render_scenario(output: &mut String, stats: &ScenarioStats) {
    output.push_str(&format!("{} [{} {}]\n", stats.name, stats.method, stats.path));
    output.push_str(&format!(
        "  Requests:    {} ({} ok, {} failed)\n",
        stats.requests, stats.successes, stats.failures
    ));
    output.push_str(&format!("  Throughput:  {:.1} req/s\n", stats.throughput_rps));
    output.push_str(&format!(
        "  Latency:     mean {:.1} / p50 {:.1} / p95 {:.1} / p99 {:.1} / max {:.1} ms\n",
        stats.latency_mean_ms,
        stats.latency_p50_ms,
        stats.latency_p95_ms,
        stats.latency_p99_ms,
        stats.latency_max_ms
    ));

    if !stats.status_counts.is_empty() {
        let statuses: Vec<String> = stats
            .status_counts
            .iter()
            .map(|(code, n)| format!("{code}={n}"))
            .collect();
        output.push_str(&format!("  Status:      {}\n", statuses.join(" ")));
    }

    if !stats.failures_by_kind.is_empty() {
        let kinds: Vec<String> = stats
            .failures_by_kind
            .iter()
            .map(|(kind, n)| format!("{kind}={n}"))
            .collect();
        output.push_str(&format!("  Failures:    {}\n", kinds.join(" ")));
    }

    if stats.issue_accepted + stats.issue_rejected > 0 {
        output.push_str(&format!(
            "  Issuance:    {} accepted, {} rejected\n",
            stats.issue_accepted, stats.issue_rejected
        ));
    }
}

/// Serialize a run report to a pretty-printed JSON string.
pub fn to_json(report: &RunReport) -> LoadResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Header for the history Markdown table.
const TABLE_HEADER: &str = "\
| Date | Host | Scenario | Users | Requests | Failed | RPS | P50 (ms) | P95 (ms) | P99 (ms) |
|------|------|----------|-------|----------|--------|-----|----------|----------|----------|";

/// Produce one Markdown table row per scenario in the run.
pub fn to_markdown_rows(report: &RunReport) -> Vec<String> {
    let date = report
        .timestamp
        .split('T')
        .next()
        .unwrap_or(&report.timestamp);
    report
        .scenarios
        .iter()
        .map(|s| {
            format!(
                "| {} | {} | {} | {} | {} | {} | {:.1} | {:.1} | {:.1} | {:.1} |",
                date,
                report.host,
                s.name,
                report.users,
                s.requests,
                s.failures,
                s.throughput_rps,
                s.latency_p50_ms,
                s.latency_p95_ms,
                s.latency_p99_ms,
            )
        })
        .collect()
}

/// Generate a complete Markdown table from multiple runs.
pub fn to_markdown_table(reports: &[RunReport]) -> String {
    let mut lines = vec![
        "## Load Test Results".to_string(),
        String::new(),
        TABLE_HEADER.to_string(),
    ];
    for r in reports {
        lines.extend(to_markdown_rows(r));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Append runs to a Markdown history file.
///
/// Creates the file with a header when missing, appends rows when the table
/// already exists, and adds a new table section otherwise.
pub fn append_history(path: &Path, reports: &[RunReport]) -> LoadResult<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let new_rows: Vec<String> = reports.iter().flat_map(to_markdown_rows).collect();

    let content = if existing.is_empty() {
        let mut lines = vec![
            "# Coupon Service Load History".to_string(),
            String::new(),
            TABLE_HEADER.to_string(),
        ];
        lines.extend(new_rows);
        lines.push(String::new());
        lines.join("\n")
    } else if existing.contains(TABLE_HEADER.lines().next().unwrap_or("")) {
        let mut out = existing.trim_end().to_string();
        for row in &new_rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    } else {
        let mut out = existing;
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&to_markdown_table(reports));
        out
    };

    std::fs::write(path, content)?;
    Ok(())
}
