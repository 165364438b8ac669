//! Per-invocation outcome records.

use crate::payload::CouponIssueResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP method used by a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Why an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No connection established within the connection timeout
    ConnectTimeout,
    /// No complete response within the network timeout
    NetworkTimeout,
    /// Reset, refused, DNS failure or a broken body
    Transport,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectTimeout => write!(f, "connect-timeout"),
            Self::NetworkTimeout => write!(f, "network-timeout"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

impl FailureKind {
    /// Classify a reqwest error.
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::NetworkTimeout
            }
        } else {
            Self::Transport
        }
    }
}

/// Outcome of one invocation.
///
/// Any HTTP response counts as success, whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A response arrived
    Success,
    /// The request was abandoned
    Failure {
        /// Failure class
        kind: FailureKind,
        /// Error text
        message: String,
    },
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Scenario that produced the sample.
    pub scenario: String,
    /// Method sent.
    pub method: HttpMethod,
    /// Path requested.
    pub path: String,
    /// HTTP status, when a response arrived.
    pub status: Option<u16>,
    /// Wall time from send to end of body (or to failure).
    pub latency: Duration,
    /// Success or failure classification.
    pub outcome: Outcome,
    /// Issuance verdict parsed from the body, if the body had that shape.
    pub issue_response: Option<CouponIssueResponse>,
}

impl Sample {
    /// Whether a response arrived.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    /// Failure class, if the invocation failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            Outcome::Success => None,
            Outcome::Failure { kind, .. } => Some(*kind),
        }
    }
}
