//! couponload: load-generation core for the coupon issuance service.
//!
//! Scenarios are plain task functions held in an explicit
//! [`ScenarioRegistry`]. The [`Harness`] runs a fixed number of simulated
//! users, each with its own HTTP client and seedable RNG, and folds their
//! [`Sample`]s into a [`RunReport`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Scenario     │    │ Harness      │    │ Target       │
//! │ Registry     │───►│ (N users,    │───►│ /hello       │
//! │ (name → fn)  │    │  own client  │    │ /v1/issue-*  │
//! └──────────────┘    │  + own RNG)  │    └──────────────┘
//!                     └──────┬───────┘
//!                            ▼
//!                      RunReport → text / JSON / Markdown
//! ```
//!
//! Request failures never abort a run: connection timeouts, network
//! timeouts and transport errors become failed samples.

#![warn(missing_docs)]

pub mod client;
pub mod config;
mod error;
pub mod harness;
pub mod payload;
pub mod report;
pub mod sample;
pub mod scenario;
pub mod stats;
pub mod tasks;

pub use client::UserClient;
pub use config::{RunConfig, Timeouts};
pub use error::{LoadError, LoadResult};
pub use harness::Harness;
pub use payload::{CouponIssueRequest, CouponIssueResponse};
pub use sample::{FailureKind, HttpMethod, Outcome, Sample};
pub use scenario::{Scenario, ScenarioRegistry, TaskFn, UserContext};
pub use stats::{RunReport, ScenarioStats};
pub use tasks::{hello_world_task, issue_coupon_sync_task, issue_coupon_task};
