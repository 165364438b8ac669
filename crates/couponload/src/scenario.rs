//! Scenario definitions and the registry the harness schedules from.
//!
//! A scenario binds a name to a task function value together with the
//! request shape it produces and the timeouts its users' clients are built
//! with. Scenarios are registered once at startup and never mutated.

use crate::client::UserClient;
use crate::config::Timeouts;
use crate::error::{LoadError, LoadResult};
use crate::sample::{HttpMethod, Sample};
use crate::tasks;
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Name of the health-endpoint scenario.
pub const HELLO_WORLD: &str = "hello-world";
/// Name of the asynchronous coupon issuance scenario.
pub const ISSUE_COUPON_ASYNC: &str = "issue-coupon-async";
/// Name of the synchronous coupon issuance scenario.
pub const ISSUE_COUPON_SYNC: &str = "issue-coupon-sync";

/// Everything one simulated user owns: its connection pool and its RNG.
#[derive(Debug)]
pub struct UserContext {
    /// Scenario name recorded on every sample
    pub scenario: String,
    /// Path the scenario targets
    pub path: String,
    /// The user's own HTTP client
    pub client: UserClient,
    /// The user's own random source
    pub rng: StdRng,
}

impl UserContext {
    /// Create a context with an explicit RNG.
    pub fn new(
        scenario: impl Into<String>,
        path: impl Into<String>,
        client: UserClient,
        rng: StdRng,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            path: path.into(),
            client,
            rng,
        }
    }

    /// Create a context whose RNG is `seed` when given, entropy otherwise.
    pub fn seeded(
        scenario: impl Into<String>,
        path: impl Into<String>,
        client: UserClient,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::new(scenario, path, client, rng)
    }
}

/// A task function: builds and sends one request, always yielding a sample.
pub type TaskFn = for<'a> fn(&'a mut UserContext) -> BoxFuture<'a, Sample>;

/// A named, repeatable unit of request generation.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Registry key
    pub name: String,
    /// Method the task sends
    pub method: HttpMethod,
    /// Path the task sends to
    pub path: String,
    /// Client timeouts for users running this scenario
    pub timeouts: Timeouts,
    /// Task invoked once per iteration
    pub task: TaskFn,
}

impl Scenario {
    /// Define a scenario
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        timeouts: Timeouts,
        task: TaskFn,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            timeouts,
            task,
        }
    }

    /// Build the context one user of this scenario runs with: a fresh
    /// client honoring the scenario's timeouts and its own RNG.
    pub fn context(&self, base_url: &str, seed: Option<u64>) -> LoadResult<UserContext> {
        let client = UserClient::new(base_url, &self.timeouts)?;
        Ok(UserContext::seeded(&self.name, &self.path, client, seed))
    }

    /// Run the task once.
    pub async fn invoke(&self, ctx: &mut UserContext) -> Sample {
        (self.task)(ctx).await
    }
}

/// Explicit name → scenario mapping, populated at startup.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: BTreeMap<String, Scenario>,
}

impl ScenarioRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in coupon-service scenarios.
    #[must_use]
    pub fn builtin(timeouts: Timeouts) -> Self {
        let mut scenarios = BTreeMap::new();
        for scenario in [
            Scenario::new(
                HELLO_WORLD,
                HttpMethod::Get,
                tasks::HELLO_PATH,
                timeouts,
                tasks::hello_world_task,
            ),
            Scenario::new(
                ISSUE_COUPON_ASYNC,
                HttpMethod::Post,
                tasks::ISSUE_ASYNC_PATH,
                timeouts,
                tasks::issue_coupon_task,
            ),
            Scenario::new(
                ISSUE_COUPON_SYNC,
                HttpMethod::Post,
                tasks::ISSUE_SYNC_PATH,
                timeouts,
                tasks::issue_coupon_sync_task,
            ),
        ] {
            scenarios.insert(scenario.name.clone(), scenario);
        }
        Self { scenarios }
    }

    /// Add a scenario; names must be unique.
    pub fn register(&mut self, scenario: Scenario) -> LoadResult<()> {
        if self.scenarios.contains_key(&scenario.name) {
            return Err(LoadError::DuplicateScenario {
                name: scenario.name,
            });
        }
        self.scenarios.insert(scenario.name.clone(), scenario);
        Ok(())
    }

    /// Look up a scenario by name
    pub fn get(&self, name: &str) -> LoadResult<&Scenario> {
        self.scenarios
            .get(name)
            .ok_or_else(|| LoadError::UnknownScenario {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    /// Resolve a list of names, preserving order.
    pub fn select(&self, names: &[String]) -> LoadResult<Vec<Scenario>> {
        names.iter().map(|n| self.get(n).cloned()).collect()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.scenarios.keys().map(String::as_str).collect()
    }

    /// Iterate scenarios in name order
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    /// Number of registered scenarios
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
