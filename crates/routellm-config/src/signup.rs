use serde::Deserialize;

/// Token allowance granted to self-service accounts
pub const DEFAULT_SIGNUP_LIMIT: u64 = 500_000;

/// Self-service signup configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupConfig {
    /// Whether `POST /signup` creates accounts
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Plan assigned to new accounts
    #[serde(default = "default_plan")]
    pub plan: String,
    /// Token ceiling assigned to new accounts
    #[serde(default = "default_usage_limit")]
    pub usage_limit: u64,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            plan: default_plan(),
            usage_limit: DEFAULT_SIGNUP_LIMIT,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_plan() -> String {
    "free".to_owned()
}

const fn default_usage_limit() -> u64 {
    DEFAULT_SIGNUP_LIMIT
}
