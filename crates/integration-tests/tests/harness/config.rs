//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use routellm_config::{
    Config, CorsConfig, HealthConfig, LedgerConfig, MemoryLedgerConfig, ModelPrice, SeedAccount, ServerConfig,
    UpstreamConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
    accounts: Vec<SeedAccount>,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
            accounts: Vec::new(),
        }
    }

    /// Point the upstream at a mock backend
    pub fn with_upstream(mut self, base_url: &str) -> Self {
        self.config.upstream = UpstreamConfig {
            base_url: base_url.parse().expect("valid URL"),
            api_key: Some(SecretString::from("test-key")),
            timeout: "5s".to_owned(),
            ..UpstreamConfig::default()
        };
        self
    }

    /// Seed an account into the in-memory ledger
    pub fn with_account(mut self, key: &str, plan: &str, usage_limit: u64, usage_used: u64) -> Self {
        self.accounts.push(SeedAccount {
            key: key.to_owned(),
            plan: plan.to_owned(),
            usage_limit,
            usage_used,
        });
        self
    }

    /// Price a model in USD per million prompt and completion tokens
    pub fn with_price(mut self, model: &str, prompt_per_mtok: f64, completion_per_mtok: f64) -> Self {
        self.config.pricing.models.insert(
            model.to_owned(),
            ModelPrice {
                prompt_per_mtok,
                completion_per_mtok,
            },
        );
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable self-service signup
    pub fn without_signup(mut self) -> Self {
        self.config.signup.enabled = false;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(mut self) -> Config {
        self.config.ledger = LedgerConfig::Memory(MemoryLedgerConfig {
            accounts: self.accounts,
        });
        self.config.validate().expect("valid test config");
        self.config
    }
}
