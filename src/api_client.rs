//! HTTP client for the claude.ai usage endpoints.

use crate::types::{Organization, UsageSnapshot};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const BASE_URL: &str = "https://claude.ai/api/organizations";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a usage API call. Every response the service can produce maps
/// onto exactly one variant, so callers match instead of string-sniffing.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Network(#[from] ureq::Error),
    #[error("unauthorized — session key is invalid or expired")]
    Unauthorized,
    #[error("forbidden — missing permissions or Cloudflare block")]
    Forbidden,
    #[error("rate limited — try again later")]
    RateLimited,
    #[error("received HTML instead of JSON — possibly blocked by Cloudflare")]
    BlockedByGateway,
    #[error("unexpected HTTP {0}")]
    UnexpectedStatus(u16),
    #[error("failed to parse {what}: {source}")]
    Decode {
        what: &'static str,
        source: serde_json::Error,
    },
    #[error("no organizations found")]
    EmptyOrganizationList,
}

/// Fetches the account's organization list and returns its first entry.
pub fn resolve_organization(session_key: &str) -> Result<Organization, ApiError> {
    let body = fetch(BASE_URL, session_key)?;
    first_organization(&body)
}

/// Fetches the usage snapshot scoped to one organization.
pub fn fetch_usage(session_key: &str, org_id: &str) -> Result<UsageSnapshot, ApiError> {
    let url = format!("{BASE_URL}/{org_id}/usage");
    let body = fetch(&url, session_key)?;
    decode_usage(&body)
}

fn fetch(url: &str, session_key: &str) -> Result<String, ApiError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(API_TIMEOUT))
        .http_status_as_error(false)
        .build()
        .into();

    debug!("GET {url}");
    let mut response = agent
        .get(url)
        .header("accept", "*/*")
        .header("accept-language", "en-US,en;q=0.9")
        .header("content-type", "application/json")
        .header("anthropic-client-platform", "web_claude_ai")
        .header("anthropic-client-version", "1.0.0")
        .header("user-agent", USER_AGENT)
        .header("origin", "https://claude.ai")
        .header("referer", "https://claude.ai/settings/usage")
        .header("cookie", &format!("sessionKey={session_key}"))
        .call()?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    debug!("HTTP {status}, {} bytes", body.len());

    classify(status, body)
}

/// The response decision table: pass through a JSON 200 body, map everything
/// else onto a typed outcome. A 200 whose trimmed body starts with `<` is an
/// edge-proxy challenge page, not a payload.
fn classify(status: u16, body: String) -> Result<String, ApiError> {
    match status {
        200 if body.trim().starts_with('<') => Err(ApiError::BlockedByGateway),
        200 => Ok(body),
        401 => Err(ApiError::Unauthorized),
        403 => Err(ApiError::Forbidden),
        429 => Err(ApiError::RateLimited),
        other => Err(ApiError::UnexpectedStatus(other)),
    }
}

fn first_organization(body: &str) -> Result<Organization, ApiError> {
    let orgs: Vec<Organization> = serde_json::from_str(body).map_err(|source| ApiError::Decode {
        what: "organizations",
        source,
    })?;
    orgs.into_iter().next().ok_or(ApiError::EmptyOrganizationList)
}

fn decode_usage(body: &str) -> Result<UsageSnapshot, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        what: "usage response",
        source,
    })
}
