//! Task functions for the coupon service scenarios.
//!
//! Each task sends exactly one request to the path of the scenario it runs
//! under and returns its [`Sample`]. Nothing is retried, and failures never
//! escape as errors.

use crate::payload::CouponIssueRequest;
use crate::sample::Sample;
use crate::scenario::UserContext;
use futures::future::{BoxFuture, FutureExt};

/// Liveness endpoint.
pub const HELLO_PATH: &str = "/hello";
/// Redis-queued asynchronous issuance endpoint.
pub const ISSUE_ASYNC_PATH: &str = "/v1/issue-async";
/// Lock-guarded synchronous issuance endpoint.
pub const ISSUE_SYNC_PATH: &str = "/v1/issue";

/// Bodiless `GET`, `/hello` for the built-in scenario.
pub fn hello_world_task(ctx: &mut UserContext) -> BoxFuture<'_, Sample> {
    async move { ctx.client.get(&ctx.scenario, &ctx.path).await }.boxed()
}

/// JSON `POST` of a fresh `{userId, couponId}` payload, `/v1/issue-async`
/// for the built-in scenario.
pub fn issue_coupon_task(ctx: &mut UserContext) -> BoxFuture<'_, Sample> {
    let payload = CouponIssueRequest::random(&mut ctx.rng);
    async move { ctx.client.post_json(&ctx.scenario, &ctx.path, &payload).await }.boxed()
}

/// Same payload as [`issue_coupon_task`], `/v1/issue` for the built-in
/// scenario.
pub fn issue_coupon_sync_task(ctx: &mut UserContext) -> BoxFuture<'_, Sample> {
    issue_coupon_task(ctx)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Timeouts;
    use crate::payload::{MAX_USER_ID, MIN_USER_ID, TARGET_COUPON_ID};
    use crate::sample::{FailureKind, HttpMethod};
    use crate::scenario::{
        Scenario, ScenarioRegistry, HELLO_WORLD, ISSUE_COUPON_ASYNC, ISSUE_COUPON_SYNC,
    };
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_routes() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(HELLO_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;
        for route in [ISSUE_ASYNC_PATH, ISSUE_SYNC_PATH] {
            Mock::given(method("POST"))
                .and(path(route))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_raw(r#"{"isSuccess":true}"#, "application/json"),
                )
                .mount(&server)
                .await;
        }
        server
    }

    fn context(server: &MockServer, scenario: &str, seed: u64) -> UserContext {
        ScenarioRegistry::builtin(Timeouts::default())
            .get(scenario)
            .unwrap()
            .context(&server.uri(), Some(seed))
            .unwrap()
    }

    #[tokio::test]
    async fn test_hello_world_sends_one_bodiless_get() {
        let server = server_with_routes().await;
        let mut ctx = context(&server, HELLO_WORLD, 1);

        let sample = hello_world_task(&mut ctx).await;
        assert!(sample.is_success());
        assert_eq!(sample.scenario, HELLO_WORLD);
        assert_eq!(sample.method, HttpMethod::Get);

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].method.as_str(), "GET");
        assert_eq!(received[0].url.path(), "/hello");
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_issue_coupon_sends_one_json_post() {
        let server = server_with_routes().await;
        let mut ctx = context(&server, ISSUE_COUPON_ASYNC, 2);

        let sample = issue_coupon_task(&mut ctx).await;
        assert!(sample.is_success());
        assert!(sample.issue_response.unwrap().is_success);

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let req = &received[0];
        assert_eq!(req.method.as_str(), "POST");
        assert_eq!(req.url.path(), "/v1/issue-async");
        let content_type = req.headers.get("content-type").unwrap().to_str().unwrap();
        assert_eq!(content_type, "application/json");

        let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        let user_id = obj["userId"].as_u64().unwrap();
        assert!((MIN_USER_ID..=MAX_USER_ID).contains(&user_id));
        assert_eq!(obj["couponId"].as_u64(), Some(TARGET_COUPON_ID));
    }

    #[tokio::test]
    async fn test_issue_coupon_sync_targets_v1_issue() {
        let server = server_with_routes().await;
        let mut ctx = context(&server, ISSUE_COUPON_SYNC, 3);

        let sample = issue_coupon_sync_task(&mut ctx).await;
        assert!(sample.is_success());
        assert_eq!(sample.path, "/v1/issue");

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.path(), "/v1/issue");
    }

    #[tokio::test]
    async fn test_hundred_sequential_hellos_all_succeed() {
        let server = server_with_routes().await;
        let mut ctx = context(&server, HELLO_WORLD, 4);

        let mut successes = 0;
        let mut failures = 0;
        for _ in 0..100 {
            if hello_world_task(&mut ctx).await.is_success() {
                successes += 1;
            } else {
                failures += 1;
            }
        }
        assert_eq!(successes, 100);
        assert_eq!(failures, 0);
    }

    #[tokio::test]
    async fn test_timeout_becomes_failed_sample() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut ctx = ScenarioRegistry::builtin(Timeouts::new(1, 1))
            .get(HELLO_WORLD)
            .unwrap()
            .context(&server.uri(), Some(5))
            .unwrap();

        let sample = hello_world_task(&mut ctx).await;
        assert!(!sample.is_success());
        assert_eq!(sample.failure_kind(), Some(FailureKind::NetworkTimeout));
    }

    #[tokio::test]
    async fn test_concurrent_seeded_invocations() {
        let server = server_with_routes().await;
        let uri = server.uri();

        let registry = ScenarioRegistry::builtin(Timeouts::default());
        let scenario = registry.get(ISSUE_COUPON_ASYNC).unwrap();

        let mut handles = Vec::new();
        for user in 0..10_u64 {
            let mut ctx = scenario.context(&uri, Some(1_000 + user)).unwrap();
            handles.push(tokio::spawn(async move {
                let mut ok = 0_u32;
                for _ in 0..100 {
                    if issue_coupon_task(&mut ctx).await.is_success() {
                        ok += 1;
                    }
                }
                ok
            }));
        }

        let mut total = 0;
        for handle in handles {
            total += handle.await.unwrap();
        }
        assert_eq!(total, 1_000);

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1_000);
        for req in &received {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            let user_id = body["userId"].as_u64().unwrap();
            assert!((MIN_USER_ID..=MAX_USER_ID).contains(&user_id));
            assert_eq!(body["couponId"].as_u64(), Some(TARGET_COUPON_ID));
        }
    }

    #[tokio::test]
    async fn test_task_sends_to_registered_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actuator/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let scenario = Scenario::new(
            "actuator",
            HttpMethod::Get,
            "/actuator/health",
            Timeouts::default(),
            hello_world_task,
        );
        let mut ctx = scenario.context(&server.uri(), None).unwrap();
        let sample = scenario.invoke(&mut ctx).await;
        assert_eq!(sample.status, Some(200));
        assert_eq!(sample.path, "/actuator/health");

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.path(), "/actuator/health");
    }
}
