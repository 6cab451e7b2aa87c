//! Per-request pipeline: validate, authorize, check quota, dispatch, account

use std::sync::Arc;

use jiff::Timestamp;
use routellm_config::{Config, SignupConfig};
use routellm_core::Classification;
use routellm_ledger::{Account, Ledger, LedgerError, UsageRecord};
use routellm_routing::{ComplexityRouter, CostEstimator};

use crate::error::GatewayError;
use crate::provider::{Backend, BackendError, Completion, OpenRouterBackend};
use crate::types::{
    AccountListing, AccountListingResponse, AccountStatus, RouteRequest, RouteResponse, SignupRequest,
    SignupResponse, UsageStats,
};

/// Shared state for the gateway's route handlers
#[derive(Clone)]
pub struct RouteState {
    inner: Arc<RouteStateInner>,
}

struct RouteStateInner {
    ledger: Arc<dyn Ledger>,
    backend: Arc<dyn Backend>,
    router: ComplexityRouter,
    pricing: CostEstimator,
    signup: SignupConfig,
}

impl RouteState {
    /// Assemble state from its collaborators
    pub fn new(
        ledger: Arc<dyn Ledger>,
        backend: Arc<dyn Backend>,
        router: ComplexityRouter,
        pricing: CostEstimator,
        signup: SignupConfig,
    ) -> Self {
        Self {
            inner: Arc::new(RouteStateInner {
                ledger,
                backend,
                router,
                pricing,
                signup,
            }),
        }
    }

    /// Build state from configuration with the `OpenRouter` backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be constructed.
    pub fn from_config(config: &Config, ledger: Arc<dyn Ledger>) -> Result<Self, BackendError> {
        let backend = OpenRouterBackend::new(&config.upstream)?;

        Ok(Self::new(
            ledger,
            Arc::new(backend),
            ComplexityRouter::from_config(&config.routing),
            CostEstimator::from_config(&config.pricing),
            config.signup.clone(),
        ))
    }

    /// Route a prompt to a backend model and charge the account
    pub async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, GatewayError> {
        if request.prompt.trim().is_empty() {
            return Err(GatewayError::EmptyPrompt);
        }

        let account = self
            .lookup(&request.subscription_key)
            .await?
            .ok_or(GatewayError::UnknownAccount)?;

        if !account.has_quota() {
            tracing::info!(
                account = %account.account_key,
                used = account.usage_used,
                limit = account.usage_limit,
                "quota exceeded"
            );
            return Err(GatewayError::QuotaExceeded {
                used: account.usage_used,
                limit: account.usage_limit,
            });
        }

        let decision = self.inner.router.route(&request.prompt);

        let completion = self
            .inner
            .backend
            .complete(&decision.model, &request.prompt)
            .await
            .map_err(|e| {
                tracing::warn!(
                    backend = self.inner.backend.name(),
                    model = %decision.model,
                    error = %e,
                    "backend call failed"
                );
                GatewayError::from(e)
            })?;

        let cost_usd = self.inner.pricing.estimate(
            &decision.model,
            completion.prompt_tokens,
            completion.completion_tokens,
        );

        let record = UsageRecord {
            account_key: account.account_key.clone(),
            classification: decision.classification,
            model: decision.model.clone(),
            prompt_tokens: completion.prompt_tokens,
            completion_tokens: completion.completion_tokens,
            total_tokens: completion.total_tokens,
            cost_usd,
            timestamp: Timestamp::now(),
        };

        let requests_remaining = self.account_usage(&account, &record).await;

        tracing::debug!(
            account = %account.account_key,
            model = %decision.model,
            tokens = completion.total_tokens,
            cost_usd,
            remaining = requests_remaining,
            "request completed"
        );

        let Completion { text, total_tokens, .. } = completion;

        Ok(RouteResponse {
            response: text,
            model_used: decision.model,
            tokens_used: total_tokens,
            cost_usd,
            requests_remaining,
        })
    }

    /// Apply a completed request to the ledger and return the remaining allowance
    ///
    /// Write failures are logged and never fail the request.
    async fn account_usage(&self, snapshot: &Account, record: &UsageRecord) -> u64 {
        let remaining = match self
            .inner
            .ledger
            .increment_usage(&record.account_key, record.total_tokens)
            .await
        {
            Ok(updated) => updated.remaining(),
            Err(e) => {
                log_write_failure("increment_usage", record, &e);
                snapshot
                    .usage_limit
                    .saturating_sub(snapshot.usage_used.saturating_add(record.total_tokens))
            }
        };

        if let Err(e) = self.inner.ledger.append_record(record).await {
            log_write_failure("append_record", record, &e);
        }

        remaining
    }

    /// Current quota state of one account
    pub async fn account_status(&self, account_key: &str) -> Result<AccountStatus, GatewayError> {
        let account = self.lookup(account_key).await?.ok_or(GatewayError::AccountNotFound)?;
        Ok(account.into())
    }

    /// Quota state of every account
    pub async fn list_accounts(&self) -> Result<AccountListingResponse, GatewayError> {
        let accounts = self
            .inner
            .ledger
            .list_accounts()
            .await
            .map_err(ledger_unavailable)?;

        Ok(AccountListingResponse {
            subscriptions: accounts.into_iter().map(AccountListing::from).collect(),
        })
    }

    /// Usage statistics aggregated from an account's history
    pub async fn stats(&self, account_key: &str) -> Result<UsageStats, GatewayError> {
        let account = self.lookup(account_key).await?.ok_or(GatewayError::AccountNotFound)?;

        let records = self
            .inner
            .ledger
            .records(account_key)
            .await
            .map_err(ledger_unavailable)?;

        let total_savings = self.savings(&records);

        Ok(UsageStats::new(account, &records, total_savings))
    }

    /// USD saved by serving simple prompts below the complex model's price
    ///
    /// Each simple record is repriced at the complex model; complex records
    /// save nothing.
    fn savings(&self, records: &[UsageRecord]) -> f64 {
        let baseline = self.inner.router.model_for(Classification::Complex);

        records
            .iter()
            .filter(|record| !record.classification.is_complex())
            .map(|record| {
                let full_price = self
                    .inner
                    .pricing
                    .estimate(baseline, record.prompt_tokens, record.completion_tokens);
                (full_price - record.cost_usd).max(0.0)
            })
            .sum()
    }

    /// Create a self-service account
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, GatewayError> {
        let signup = &self.inner.signup;

        if !signup.enabled {
            return Err(GatewayError::SignupDisabled);
        }

        let email = request.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(GatewayError::InvalidEmail);
        }

        let account = self
            .inner
            .ledger
            .create_account(&signup.plan, signup.usage_limit)
            .await
            .map_err(ledger_unavailable)?;

        tracing::info!(email, account = %account.account_key, plan = %account.plan, "account created");

        Ok(SignupResponse {
            subscription_key: account.account_key,
            plan: account.plan,
            usage_limit: account.usage_limit,
        })
    }

    async fn lookup(&self, account_key: &str) -> Result<Option<Account>, GatewayError> {
        self.inner.ledger.lookup(account_key).await.map_err(ledger_unavailable)
    }
}

fn ledger_unavailable(error: LedgerError) -> GatewayError {
    tracing::warn!(error = %error, "ledger read failed");
    GatewayError::LedgerUnavailable(error)
}

fn log_write_failure(operation: &str, record: &UsageRecord, error: &LedgerError) {
    tracing::error!(
        kind = "LedgerWriteFailure",
        operation,
        account = %record.account_key,
        classification = %record.classification,
        model = %record.model,
        prompt_tokens = record.prompt_tokens,
        completion_tokens = record.completion_tokens,
        total_tokens = record.total_tokens,
        cost_usd = record.cost_usd,
        timestamp = %record.timestamp,
        error = %error,
        "ledger write failed after successful completion"
    );
}
