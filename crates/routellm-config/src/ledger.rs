use std::collections::HashSet;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Usage ledger backend selection
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerConfig {
    /// In-process ledger; state is lost on restart
    Memory(MemoryLedgerConfig),
    /// External ledger service reached over HTTP
    Remote(RemoteLedgerConfig),
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::Memory(MemoryLedgerConfig::default())
    }
}

/// In-memory ledger configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryLedgerConfig {
    /// Accounts present at startup
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
}

/// Account preloaded into the in-memory ledger
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedAccount {
    /// Subscription key callers present
    pub key: String,
    /// Plan label (informational)
    #[serde(default = "default_plan")]
    pub plan: String,
    /// Token ceiling
    pub usage_limit: u64,
    /// Tokens already consumed
    #[serde(default)]
    pub usage_used: u64,
}

/// Remote ledger service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteLedgerConfig {
    /// Base URL of the ledger service
    pub url: Url,
    /// Service API key sent as `x-service-api-key`
    pub service_api_key: SecretString,
    /// Per-request timeout
    #[serde(default = "default_remote_timeout")]
    pub timeout: String,
}

impl RemoteLedgerConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid
    pub fn timeout_duration(&self) -> Result<Duration, String> {
        duration_str::parse(&self.timeout).map_err(|e| format!("invalid ledger timeout '{}': {e}", self.timeout))
    }
}

impl LedgerConfig {
    /// Validate ledger configuration
    ///
    /// # Errors
    ///
    /// Returns an error if seed accounts are duplicated or have a zero
    /// limit, or the remote timeout cannot be parsed
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Memory(memory) => {
                let mut seen = HashSet::new();
                for account in &memory.accounts {
                    if account.key.trim().is_empty() {
                        return Err("ledger account key must not be empty".to_owned());
                    }
                    if !seen.insert(account.key.as_str()) {
                        return Err(format!("duplicate ledger account key '{}'", account.key));
                    }
                    if account.usage_limit == 0 {
                        return Err(format!("ledger account '{}' must have a usage_limit above 0", account.key));
                    }
                }
                Ok(())
            }
            Self::Remote(remote) => remote.timeout_duration().map(|_| ()),
        }
    }
}

fn default_plan() -> String {
    "free".to_owned()
}

fn default_remote_timeout() -> String {
    "5s".to_owned()
}
