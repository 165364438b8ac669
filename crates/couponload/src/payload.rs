//! Request and response bodies for the coupon issuance endpoints.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest `userId` a generated payload may carry.
pub const MIN_USER_ID: u64 = 1;

/// Highest `userId` a generated payload may carry.
pub const MAX_USER_ID: u64 = 10_000_000;

/// Coupon every generated payload targets.
pub const TARGET_COUPON_ID: u64 = 3;

/// Body of `POST /v1/issue-async` and `POST /v1/issue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponIssueRequest {
    /// Requesting user.
    pub user_id: u64,
    /// Coupon to issue.
    pub coupon_id: u64,
}

impl CouponIssueRequest {
    /// Draw a fresh payload: uniform `userId` in `[1, 10_000_000]`, `couponId` 3.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            user_id: rng.gen_range(MIN_USER_ID..=MAX_USER_ID),
            coupon_id: TARGET_COUPON_ID,
        }
    }
}

/// Body returned by the issuance endpoints.
///
/// `comment` is omitted by the server when the request was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponIssueResponse {
    /// Whether the server accepted the issuance request.
    pub is_success: bool,
    /// Rejection reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CouponIssueResponse {
    /// Parse a response body, returning `None` for anything that is not the
    /// issuance response shape.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
