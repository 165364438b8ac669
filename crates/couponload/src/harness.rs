//! Concurrent run engine.
//!
//! Spawns one tokio task per simulated user. Each user owns its client, RNG
//! and sample buffer; buffers are merged only after every user has finished,
//! so no mutable state is shared while the run is in progress.

use crate::client::UserClient;
use crate::config::RunConfig;
use crate::error::{LoadError, LoadResult};
use crate::sample::Sample;
use crate::scenario::{Scenario, ScenarioRegistry, UserContext};
use crate::stats::RunReport;
use std::time::Instant;
use tokio::sync::watch;
use tracing::Instrument;

/// Load test executor.
#[derive(Debug)]
pub struct Harness {
    registry: ScenarioRegistry,
    config: RunConfig,
}

impl Harness {
    /// Create a harness over an explicit registry.
    pub fn new(registry: ScenarioRegistry, config: RunConfig) -> Self {
        Self { registry, config }
    }

    /// Create a harness over the built-in scenarios, defined with the
    /// configured timeouts.
    pub fn with_builtin(config: RunConfig) -> Self {
        let registry = ScenarioRegistry::builtin(config.timeouts);
        Self::new(registry, config)
    }

    /// Probe the target's `/hello` endpoint.
    pub async fn check_health(&self) -> LoadResult<u16> {
        let client = UserClient::new(self.config.base_url(), &self.config.timeouts)?;
        client.health_check().await
    }

    /// Run until the deadline or iteration cap.
    pub async fn run(&self) -> LoadResult<RunReport> {
        let (_stop_tx, stop_rx) = watch::channel(false);
        self.run_with_stop(stop_rx).await
    }

    /// Run until the deadline, the iteration cap, or `stop` turns `true`.
    ///
    /// Stopping only prevents new invocations; requests already in flight
    /// complete or time out on their own.
    pub async fn run_with_stop(&self, stop: watch::Receiver<bool>) -> LoadResult<RunReport> {
        self.config.validate()?;
        let scenarios = self.registry.select(&self.config.scenarios)?;

        if self.config.health_check {
            match self.check_health().await {
                Ok(status) => tracing::info!(status, host = %self.config.host, "health check passed"),
                Err(e) => tracing::warn!(error = %e, "health check failed, proceeding anyway"),
            }
        }

        let base_url = self.config.base_url();
        let started = Instant::now();
        let deadline = match self.config.duration() {
            Some(d) => Some(started.checked_add(d).ok_or_else(|| {
                LoadError::invalid_config(format!(
                    "duration of {}s is too long",
                    self.config.duration_secs
                ))
            })?),
            None => None,
        };
        let iterations = self.config.iterations;

        tracing::info!(
            host = base_url,
            users = self.config.users,
            duration_secs = self.config.duration_secs,
            ?iterations,
            scenarios = ?self.config.scenarios,
            "starting load test"
        );

        let mut handles = Vec::with_capacity(self.config.users);
        for user_index in 0..self.config.users {
            let scenario = scenarios[user_index % scenarios.len()].clone();
            let seed = self.config.seed.map(|s| s.wrapping_add(user_index as u64));
            let ctx = scenario.context(base_url, seed)?;
            let span = tracing::debug_span!("user", index = user_index, scenario = %scenario.name);

            handles.push(tokio::spawn(
                run_user(scenario, ctx, deadline, iterations, stop.clone()).instrument(span),
            ));
        }

        let mut all_samples = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(samples) => all_samples.extend(samples),
                Err(e) => tracing::warn!(error = %e, "simulated user aborted"),
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        let report = RunReport::from_samples(&all_samples, base_url, self.config.users, elapsed);
        tracing::info!(
            requests = report.total_requests,
            failed = report.failed,
            elapsed_secs = elapsed,
            "load test finished"
        );
        Ok(report)
    }
}

/// One simulated user's loop.
async fn run_user(
    scenario: Scenario,
    mut ctx: UserContext,
    deadline: Option<Instant>,
    iterations: Option<u64>,
    stop: watch::Receiver<bool>,
) -> Vec<Sample> {
    let mut samples = Vec::new();
    loop {
        let stopped = *stop.borrow();
        if stopped {
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        if iterations.is_some_and(|n| samples.len() as u64 >= n) {
            break;
        }
        samples.push(scenario.invoke(&mut ctx).await);
    }
    tracing::debug!(invocations = samples.len(), "user finished");
    samples
}
