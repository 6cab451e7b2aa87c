//! Usage ledger for `RouteLLM`
//!
//! The ledger owns account quota state and the append-only usage history.
//! Callers depend on the [`Ledger`] trait; [`MemoryLedger`] keeps state in
//! process and [`RemoteLedger`] talks to an external ledger service.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod error;
pub mod memory;
pub mod remote;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use routellm_config::LedgerConfig;

pub use error::LedgerError;
pub use memory::MemoryLedger;
pub use remote::RemoteLedger;
pub use types::{Account, UsageRecord, UsageSummary};

/// Account state and usage history store
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Resolve an account by key
    async fn lookup(&self, account_key: &str) -> Result<Option<Account>, LedgerError>;

    /// Add `tokens` to an account's usage and return the updated account
    async fn increment_usage(&self, account_key: &str, tokens: u64) -> Result<Account, LedgerError>;

    /// Append a usage record to the account's history
    async fn append_record(&self, record: &UsageRecord) -> Result<(), LedgerError>;

    /// Create a new account with a fresh key
    async fn create_account(&self, plan: &str, usage_limit: u64) -> Result<Account, LedgerError>;

    /// All known accounts
    async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError>;

    /// Usage history of one account, oldest first
    async fn records(&self, account_key: &str) -> Result<Vec<UsageRecord>, LedgerError>;
}

/// Build the configured ledger
pub fn build_ledger(config: &LedgerConfig) -> Result<Arc<dyn Ledger>, LedgerError> {
    match config {
        LedgerConfig::Memory(memory) => {
            let ledger = MemoryLedger::from_seeds(&memory.accounts);
            tracing::info!(accounts = memory.accounts.len(), "using in-memory ledger");
            Ok(Arc::new(ledger))
        }
        LedgerConfig::Remote(remote) => {
            let timeout = remote
                .timeout_duration()
                .map_err(|message| LedgerError::Api { status: 0, message })?;
            let ledger = RemoteLedger::new(remote.url.clone(), remote.service_api_key.clone(), timeout)?;
            tracing::info!(url = %remote.url, "using remote ledger");
            Ok(Arc::new(ledger))
        }
    }
}
