use serde::{Deserialize, Serialize};

/// The verdict on one posting target. Created per post attempt, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDecision {
    pub url: String,
    pub allowed: bool,
    pub reason: String,
}

/// Refusal reason for URLs without a non-prod marker.
pub const REASON_NOT_NONPROD: &str = "endpoint not recognized as dev/test";

/// Decide whether `url` may receive a post.
///
/// Allowed iff the lowercased URL contains `dev` or `test` anywhere — a
/// deliberate plain substring match, not a host allowlist, kept exactly as
/// weak as the integration surface it mirrors. An empty URL is refused.
pub fn check_endpoint(url: &str) -> EndpointDecision {
    let lower = url.to_lowercase();
    let allowed = !lower.is_empty() && (lower.contains("dev") || lower.contains("test"));
    EndpointDecision {
        url: url.to_string(),
        allowed,
        reason: if allowed {
            "url contains a dev/test marker".to_string()
        } else {
            REASON_NOT_NONPROD.to_string()
        },
    }
}
