//! Per-user HTTP client.
//!
//! Each simulated user owns one [`UserClient`], so connections are never
//! shared between users. Every request resolves to a [`Sample`]; transport
//! errors and timeouts are recorded, not returned.

use crate::config::Timeouts;
use crate::error::{LoadError, LoadResult};
use crate::payload::CouponIssueResponse;
use crate::sample::{FailureKind, HttpMethod, Outcome, Sample};
use crate::tasks::HELLO_PATH;
use serde::Serialize;
use std::time::Instant;

/// HTTP client owned by one simulated user.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
    client: reqwest::Client,
}

impl UserClient {
    /// Create a client for `base_url` honoring the given timeouts.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the target service (e.g., `http://localhost:8080`)
    /// * `timeouts` - Connection and full-response windows
    pub fn new(base_url: impl Into<String>, timeouts: &Timeouts) -> LoadResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect())
            .timeout(timeouts.network())
            .build()
            .map_err(LoadError::ClientBuild)?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a client around a preconfigured reqwest client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a bodiless GET and record the outcome.
    pub async fn get(&self, scenario: &str, path: &str) -> Sample {
        let request = self.client.get(self.url(path));
        self.execute(scenario, HttpMethod::Get, path, request).await
    }

    /// Send a POST with a JSON body and record the outcome.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        scenario: &str,
        path: &str,
        body: &T,
    ) -> Sample {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(scenario, HttpMethod::Post, path, request).await
    }

    async fn execute(
        &self,
        scenario: &str,
        method: HttpMethod,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Sample {
        let start = Instant::now();
        let mut status = None;

        let result = match request.send().await {
            Ok(resp) => {
                status = Some(resp.status().as_u16());
                // Drain the body so latency covers the whole response
                resp.bytes().await
            }
            Err(e) => Err(e),
        };
        let latency = start.elapsed();

        let (outcome, issue_response) = match result {
            Ok(body) => (Outcome::Success, CouponIssueResponse::parse(&body)),
            Err(e) => {
                let kind = FailureKind::classify(&e);
                tracing::debug!(scenario, %method, path, %kind, error = %e, "request failed");
                (
                    Outcome::Failure {
                        kind,
                        message: e.to_string(),
                    },
                    None,
                )
            }
        };

        Sample {
            scenario: scenario.to_string(),
            method,
            path: path.to_string(),
            status,
            latency,
            outcome,
            issue_response,
        }
    }

    /// Probe `GET /hello`; any response counts as reachable.
    pub async fn health_check(&self) -> LoadResult<u16> {
        let url = self.url(HELLO_PATH);
        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().as_u16()),
            Err(e) => Err(LoadError::HealthCheck {
                url,
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = UserClient::new("http://localhost:8080/", &Timeouts::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_get_records_status_and_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = UserClient::new(server.uri(), &Timeouts::default()).unwrap();
        let sample = client.get("hello-world", "/hello").await;
        assert!(sample.is_success());
        assert_eq!(sample.status, Some(200));
        assert_eq!(sample.method, HttpMethod::Get);
        assert!(sample.issue_response.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_still_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = UserClient::new(server.uri(), &Timeouts::default()).unwrap();
        let sample = client.get("hello-world", "/hello").await;
        assert!(sample.is_success());
        assert_eq!(sample.status, Some(503));
    }

    #[tokio::test]
    async fn test_post_parses_issue_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/issue-async"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"isSuccess":false,"comment":"sold out"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = UserClient::new(server.uri(), &Timeouts::default()).unwrap();
        let body = serde_json::json!({"userId": 1, "couponId": 3});
        let sample = client
            .post_json("issue-coupon-async", "/v1/issue-async", &body)
            .await;
        assert!(sample.is_success());
        let verdict = sample.issue_response.unwrap();
        assert!(!verdict.is_success);
        assert_eq!(verdict.comment.as_deref(), Some("sold out"));
    }

    #[tokio::test]
    async fn test_slow_response_is_network_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let client = UserClient::with_client(server.uri(), http);
        let sample = client.get("hello-world", "/hello").await;
        assert!(!sample.is_success());
        assert_eq!(sample.failure_kind(), Some(FailureKind::NetworkTimeout));
        assert_eq!(sample.status, None);
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_failure() {
        // Bind then drop to obtain a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client =
            UserClient::new(format!("http://127.0.0.1:{port}"), &Timeouts::default()).unwrap();
        let sample = client.get("hello-world", "/hello").await;
        assert_eq!(sample.failure_kind(), Some(FailureKind::Transport));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = UserClient::new(server.uri(), &Timeouts::default()).unwrap();
        assert_eq!(client.health_check().await.unwrap(), 200);
    }
}
