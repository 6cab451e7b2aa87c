#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
pub mod ledger;
mod loader;
pub mod pricing;
pub mod routing;
pub mod server;
pub mod signup;
pub mod telemetry;
pub mod upstream;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use ledger::*;
pub use pricing::*;
pub use routing::*;
pub use server::*;
pub use signup::*;
pub use telemetry::*;
pub use upstream::*;

/// Top-level `RouteLLM` configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream LLM backend configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Complexity routing configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Per-model price table
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Usage ledger configuration
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Self-service signup configuration
    #[serde(default)]
    pub signup: SignupConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
