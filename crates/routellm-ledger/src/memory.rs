use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use routellm_config::SeedAccount;

use crate::{
    Ledger,
    error::LedgerError,
    types::{Account, UsageRecord},
};

/// Length of the random suffix in generated account keys
const KEY_SUFFIX_LEN: usize = 12;

/// In-process ledger backed by concurrent maps
///
/// Each increment holds the account's shard lock for the duration of the
/// update, so concurrent increments on one key are never lost.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    accounts: DashMap<String, Account>,
    records: DashMap<String, Vec<UsageRecord>>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger preloaded with configured accounts
    pub fn from_seeds(seeds: &[SeedAccount]) -> Self {
        let ledger = Self::new();

        for seed in seeds {
            ledger.insert(Account {
                account_key: seed.key.clone(),
                plan: seed.plan.clone(),
                usage_used: seed.usage_used,
                usage_limit: seed.usage_limit,
            });
        }

        ledger
    }

    /// Insert or replace an account
    pub fn insert(&self, account: Account) {
        self.accounts.insert(account.account_key.clone(), account);
    }

    fn generate_key(plan: &str) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        format!("sub-{plan}-{}", &id[..KEY_SUFFIX_LEN])
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn lookup(&self, account_key: &str) -> Result<Option<Account>, LedgerError> {
        Ok(self.accounts.get(account_key).map(|entry| entry.value().clone()))
    }

    async fn increment_usage(&self, account_key: &str, tokens: u64) -> Result<Account, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(account_key)
            .ok_or_else(|| LedgerError::AccountNotFound {
                account_key: account_key.to_owned(),
            })?;

        entry.usage_used = entry.usage_used.saturating_add(tokens);
        Ok(entry.clone())
    }

    async fn append_record(&self, record: &UsageRecord) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(&record.account_key) {
            return Err(LedgerError::AccountNotFound {
                account_key: record.account_key.clone(),
            });
        }

        self.records
            .entry(record.account_key.clone())
            .or_default()
            .push(record.clone());

        Ok(())
    }

    async fn create_account(&self, plan: &str, usage_limit: u64) -> Result<Account, LedgerError> {
        loop {
            let key = Self::generate_key(plan);

            // Vacant entry guarantees a fresh key even under concurrent signups
            if let Entry::Vacant(slot) = self.accounts.entry(key.clone()) {
                let account = Account {
                    account_key: key,
                    plan: plan.to_owned(),
                    usage_used: 0,
                    usage_limit,
                };
                slot.insert(account.clone());
                return Ok(account);
            }
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|entry| entry.value().clone()).collect();
        accounts.sort_by(|a, b| a.account_key.cmp(&b.account_key));
        Ok(accounts)
    }

    async fn records(&self, account_key: &str) -> Result<Vec<UsageRecord>, LedgerError> {
        Ok(self
            .records
            .get(account_key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
