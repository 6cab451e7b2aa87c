use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default `OpenRouter` API base URL
pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1";

/// Upstream LLM backend configuration
///
/// The backend must speak the `OpenAI` chat completions protocol.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Bearer token sent to the backend
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Request timeout (e.g. "60s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Optional `HTTP-Referer` attribution header
    #[serde(default)]
    pub referer: Option<String>,
    /// Optional `X-Title` attribution header
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout: default_timeout(),
            referer: None,
            title: None,
        }
    }
}

impl UpstreamConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid or zero
    pub fn timeout_duration(&self) -> Result<Duration, String> {
        let timeout = duration_str::parse(&self.timeout)
            .map_err(|e| format!("invalid upstream timeout '{}': {e}", self.timeout))?;

        if timeout.is_zero() {
            return Err("upstream timeout must be greater than 0".to_owned());
        }

        Ok(timeout)
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_UPSTREAM_URL).expect("valid default URL")
}

fn default_timeout() -> String {
    "60s".to_owned()
}
