use indexmap::IndexMap;
use jiff::Timestamp;
use routellm_core::Classification;
use serde::{Deserialize, Serialize};

/// Subscriber account quota state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque key callers authenticate with
    pub account_key: String,
    /// Plan label (informational)
    pub plan: String,
    /// Tokens consumed so far
    #[serde(default)]
    pub usage_used: u64,
    /// Token ceiling
    pub usage_limit: u64,
}

impl Account {
    /// Whether another request may be dispatched
    pub const fn has_quota(&self) -> bool {
        self.usage_used < self.usage_limit
    }

    /// Tokens left before the limit, floored at zero
    pub const fn remaining(&self) -> u64 {
        self.usage_limit.saturating_sub(self.usage_used)
    }
}

/// One completed request, as stored in the usage history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Account billed for the request
    pub account_key: String,
    /// Prompt label
    pub classification: Classification,
    /// Backend model that served the request
    pub model: String,
    /// Prompt tokens reported by the backend
    pub prompt_tokens: u64,
    /// Completion tokens reported by the backend
    pub completion_tokens: u64,
    /// Total tokens charged against the quota
    pub total_tokens: u64,
    /// Estimated cost in USD
    pub cost_usd: f64,
    /// When the request completed
    pub timestamp: Timestamp,
}

/// Request body for incrementing usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementUsageRequest {
    /// Tokens to add
    pub tokens: u64,
}

/// Request body for creating an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Plan label
    pub plan: String,
    /// Token ceiling
    pub usage_limit: u64,
}

/// Response listing accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<Account>,
}

/// Response listing usage records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordList {
    pub records: Vec<UsageRecord>,
}

/// Aggregated view over an account's usage history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageSummary {
    /// Number of completed requests
    pub request_count: u64,
    /// Sum of total tokens
    pub total_tokens: u64,
    /// Sum of cost in USD
    pub total_cost_usd: f64,
    /// Requests labelled simple
    pub simple_requests: u64,
    /// Requests labelled complex
    pub complex_requests: u64,
    /// Tokens per model, in first-use order
    pub tokens_by_model: IndexMap<String, u64>,
}

impl UsageSummary {
    /// Fold a slice of records into a summary
    pub fn from_records(records: &[UsageRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.request_count += 1;
            summary.total_tokens += record.total_tokens;
            summary.total_cost_usd += record.cost_usd;
            match record.classification {
                Classification::Simple => summary.simple_requests += 1,
                Classification::Complex => summary.complex_requests += 1,
            }
            *summary.tokens_by_model.entry(record.model.clone()).or_default() += record.total_tokens;
            summary
        })
    }
}
