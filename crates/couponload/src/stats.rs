//! Aggregation of samples into per-scenario latency and failure statistics.

use crate::sample::{FailureKind, HttpMethod, Sample};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStats {
    /// Scenario name.
    pub name: String,
    /// Method sent.
    pub method: HttpMethod,
    /// Path requested.
    pub path: String,
    /// Invocations recorded.
    pub requests: u64,
    /// Invocations that got a response.
    pub successes: u64,
    /// Invocations that were abandoned.
    pub failures: u64,
    /// Failures by class.
    pub failures_by_kind: BTreeMap<FailureKind, u64>,
    /// Responses by HTTP status.
    pub status_counts: BTreeMap<u16, u64>,
    /// Mean latency of successful invocations (ms).
    pub latency_mean_ms: f64,
    /// Median latency (ms).
    pub latency_p50_ms: f64,
    /// 95th percentile latency (ms).
    pub latency_p95_ms: f64,
    /// 99th percentile latency (ms).
    pub latency_p99_ms: f64,
    /// Slowest successful invocation (ms).
    pub latency_max_ms: f64,
    /// Successful responses per second.
    pub throughput_rps: f64,
    /// Issuance responses with `isSuccess: true`.
    pub issue_accepted: u64,
    /// Issuance responses with `isSuccess: false`.
    pub issue_rejected: u64,
}

/// Results of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// ISO 8601 timestamp of the run.
    pub timestamp: String,
    /// Target host.
    pub host: String,
    /// Simulated users.
    pub users: usize,
    /// Wall time of the run (seconds).
    pub elapsed_secs: f64,
    /// Total invocations.
    pub total_requests: u64,
    /// Total successes.
    pub successful: u64,
    /// Total failures.
    pub failed: u64,
    /// Successful responses per second, all scenarios.
    pub throughput_rps: f64,
    /// Per-scenario breakdown, in name order.
    pub scenarios: Vec<ScenarioStats>,
}

impl RunReport {
    /// Build a report from raw samples.
    pub fn from_samples(samples: &[Sample], host: &str, users: usize, elapsed_secs: f64) -> Self {
        let mut grouped: BTreeMap<&str, Vec<&Sample>> = BTreeMap::new();
        for sample in samples {
            grouped.entry(sample.scenario.as_str()).or_default().push(sample);
        }

        let scenarios: Vec<ScenarioStats> = grouped
            .into_iter()
            .map(|(name, group)| aggregate_scenario(name, &group, elapsed_secs))
            .collect();

        let total_requests = samples.len() as u64;
        let successful = samples.iter().filter(|s| s.is_success()).count() as u64;

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            host: host.to_string(),
            users,
            elapsed_secs,
            total_requests,
            successful,
            failed: total_requests - successful,
            throughput_rps: rate(successful, elapsed_secs),
            scenarios,
        }
    }

    /// Look up one scenario's stats
    pub fn scenario(&self, name: &str) -> Option<&ScenarioStats> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Fraction of invocations that failed, 0.0 for an empty run.
    pub fn failure_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.failed as f64 / self.total_requests as f64
        }
    }
}

fn aggregate_scenario(name: &str, samples: &[&Sample], elapsed_secs: f64) -> ScenarioStats {
    let requests = samples.len() as u64;
    let successes = samples.iter().filter(|s| s.is_success()).count() as u64;

    let mut failures_by_kind = BTreeMap::new();
    let mut status_counts = BTreeMap::new();
    let mut issue_accepted = 0;
    let mut issue_rejected = 0;
    for sample in samples {
        if let Some(kind) = sample.failure_kind() {
            *failures_by_kind.entry(kind).or_insert(0) += 1;
        }
        if let Some(status) = sample.status {
            *status_counts.entry(status).or_insert(0) += 1;
        }
        match &sample.issue_response {
            Some(r) if r.is_success => issue_accepted += 1,
            Some(_) => issue_rejected += 1,
            None => {}
        }
    }

    let mut latencies: Vec<f64> = samples
        .iter()
        .filter(|s| s.is_success())
        .map(|s| s.latency.as_secs_f64() * 1000.0)
        .collect();
    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let latency_mean_ms = if latencies.is_empty() {
        0.0
    } else {
        latencies.iter().sum::<f64>() / latencies.len() as f64
    };

    let (method, path) = samples
        .first()
        .map_or((HttpMethod::Get, String::new()), |s| (s.method, s.path.clone()));

    ScenarioStats {
        name: name.to_string(),
        method,
        path,
        requests,
        successes,
        failures: requests - successes,
        failures_by_kind,
        status_counts,
        latency_mean_ms,
        latency_p50_ms: percentile(&latencies, 0.50),
        latency_p95_ms: percentile(&latencies, 0.95),
        latency_p99_ms: percentile(&latencies, 0.99),
        latency_max_ms: latencies.last().copied().unwrap_or(0.0),
        throughput_rps: rate(successes, elapsed_secs),
        issue_accepted,
        issue_rejected,
    }
}

fn rate(count: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        count as f64 / elapsed_secs
    } else {
        0.0
    }
}

/// Nearest-rank percentile of a sorted slice: the smallest value with at
/// least `p` of the data at or below it. Returns 0.0 for empty slices.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    // absorb float noise in p * len (0.07 * 100 = 7.000000000000001)
    let rank = (p.clamp(0.0, 1.0) * sorted.len() as f64 - 1e-9).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
