//! Wire types decoded from the claude.ai usage API.

use serde::Deserialize;

/// Consumption of one rolling rate-limit window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LimitUsage {
    /// Percent of the window already consumed (0-100).
    pub utilization: f64,
    /// Absolute reset instant as an RFC 3339 string. The API sends `null`
    /// (or omits the field) when the window has no scheduled reset.
    #[serde(default)]
    pub resets_at: Option<String>,
}

/// Usage for both rolling windows, one fetch's worth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UsageSnapshot {
    pub five_hour: LimitUsage,
    pub seven_day: LimitUsage,
}

/// One entry of the account's organization list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Organization {
    pub uuid: String,
    pub name: String,
}
