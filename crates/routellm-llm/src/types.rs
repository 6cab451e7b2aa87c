//! Request and response bodies of the public API

use indexmap::IndexMap;
use jiff::Timestamp;
use routellm_core::Classification;
use routellm_ledger::{Account, UsageRecord, UsageSummary};
use serde::{Deserialize, Serialize};

/// Rows returned in `recent_requests`
pub const RECENT_REQUEST_LIMIT: usize = 10;

/// Body of `POST /route`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteRequest {
    /// Prompt text forwarded to the backend
    #[serde(default)]
    pub prompt: String,
    /// Account key the request is billed to
    #[serde(default, alias = "account_key")]
    pub subscription_key: String,
}

/// Successful `POST /route` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Generated text
    pub response: String,
    /// Model that served the request
    pub model_used: String,
    /// Total tokens charged
    pub tokens_used: u64,
    /// Estimated cost in USD
    pub cost_usd: f64,
    /// Tokens left on the account after this request
    pub requests_remaining: u64,
}

/// Result of `GET /subscription/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub account_key: String,
    pub plan: String,
    pub usage_limit: u64,
    pub usage_used: u64,
    pub usage_remaining: u64,
}

impl From<Account> for AccountStatus {
    fn from(account: Account) -> Self {
        Self {
            usage_remaining: account.remaining(),
            account_key: account.account_key,
            plan: account.plan,
            usage_limit: account.usage_limit,
            usage_used: account.usage_used,
        }
    }
}

/// One row of `GET /subscriptions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListing {
    pub key: String,
    pub plan: String,
    pub limit: u64,
    pub used: u64,
    pub remaining: u64,
}

impl From<Account> for AccountListing {
    fn from(account: Account) -> Self {
        Self {
            remaining: account.remaining(),
            key: account.account_key,
            plan: account.plan,
            limit: account.usage_limit,
            used: account.usage_used,
        }
    }
}

/// Result of `GET /subscriptions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListingResponse {
    pub subscriptions: Vec<AccountListing>,
}

/// Request counts split by classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub simple: u64,
    pub complex: u64,
}

/// One row of the recent activity list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRequest {
    pub model: String,
    #[serde(rename = "type")]
    pub classification: Classification,
    pub tokens: u64,
    pub cost: f64,
    pub time: Timestamp,
}

impl From<&UsageRecord> for RecentRequest {
    fn from(record: &UsageRecord) -> Self {
        Self {
            model: record.model.clone(),
            classification: record.classification,
            tokens: record.total_tokens,
            cost: record.cost_usd,
            time: record.timestamp,
        }
    }
}

/// Result of `GET /stats/{key}`
///
/// `total_tokens` and `remaining` come from the account counter, the rest
/// is aggregated from the usage history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub account_key: String,
    pub plan: String,
    pub token_limit: u64,
    pub total_tokens: u64,
    pub remaining: u64,
    pub total_requests: u64,
    pub total_cost_usd: f64,
    /// USD saved by serving simple prompts on the cheaper model
    pub total_savings: f64,
    pub by_classification: ClassificationCounts,
    pub by_model: IndexMap<String, u64>,
    /// Latest requests, newest first
    pub recent_requests: Vec<RecentRequest>,
}

impl UsageStats {
    /// Combine an account snapshot with its usage history
    ///
    /// `records` must be in completion order.
    pub fn new(account: Account, records: &[UsageRecord], total_savings: f64) -> Self {
        let summary = UsageSummary::from_records(records);

        Self {
            remaining: account.remaining(),
            total_tokens: account.usage_used,
            token_limit: account.usage_limit,
            account_key: account.account_key,
            plan: account.plan,
            total_requests: summary.request_count,
            total_cost_usd: summary.total_cost_usd,
            total_savings,
            by_classification: ClassificationCounts {
                simple: summary.simple_requests,
                complex: summary.complex_requests,
            },
            by_model: summary.tokens_by_model,
            recent_requests: records
                .iter()
                .rev()
                .take(RECENT_REQUEST_LIMIT)
                .map(RecentRequest::from)
                .collect(),
        }
    }
}

/// Body of `POST /signup`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
}

/// Result of `POST /signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Freshly issued account key
    pub subscription_key: String,
    pub plan: String,
    pub usage_limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_request_accepts_account_key_alias() {
        let request: RouteRequest = serde_json::from_value(serde_json::json!({
            "prompt": "hi",
            "account_key": "sub-basic-001"
        }))
        .unwrap();

        assert_eq!(request.subscription_key, "sub-basic-001");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let request: RouteRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(request.prompt.is_empty());
        assert!(request.subscription_key.is_empty());
    }

    #[test]
    fn listing_reports_saturated_remaining() {
        let listing = AccountListing::from(Account {
            account_key: "k".to_owned(),
            plan: "basic".to_owned(),
            usage_used: 120,
            usage_limit: 100,
        });

        assert_eq!(listing.remaining, 0);
        assert_eq!(listing.used, 120);
    }

    #[test]
    fn recent_requests_are_newest_first_and_capped() {
        let account = Account {
            account_key: "sub-pro-001".to_owned(),
            plan: "pro".to_owned(),
            usage_used: 0,
            usage_limit: 1000,
        };
        let records: Vec<UsageRecord> = (1..=12)
            .map(|tokens| UsageRecord {
                account_key: "sub-pro-001".to_owned(),
                classification: Classification::Simple,
                model: "small".to_owned(),
                prompt_tokens: tokens,
                completion_tokens: 0,
                total_tokens: tokens,
                cost_usd: 0.0,
                timestamp: Timestamp::UNIX_EPOCH,
            })
            .collect();

        let stats = UsageStats::new(account, &records, 0.0);

        assert_eq!(stats.total_requests, 12);
        assert_eq!(stats.recent_requests.len(), RECENT_REQUEST_LIMIT);
        assert_eq!(stats.recent_requests[0].tokens, 12);
        assert_eq!(stats.recent_requests[9].tokens, 3);
    }

    #[test]
    fn recent_request_wire_names() {
        let row = RecentRequest {
            model: "large".to_owned(),
            classification: Classification::Complex,
            tokens: 42,
            cost: 0.5,
            time: Timestamp::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "COMPLEX");
        assert_eq!(json["tokens"], 42);
        assert_eq!(json["cost"], 0.5);
        assert_eq!(json["time"], "1970-01-01T00:00:00Z");
    }
}
