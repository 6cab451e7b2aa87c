use serde::Deserialize;

/// Liveness probe served next to the API
///
/// Load balancers poll this path; it never touches the ledger or upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Route the probe is mounted on
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
        }
    }
}

impl HealthConfig {
    /// # Errors
    ///
    /// Returns an error if the probe is enabled on a path that axum
    /// cannot mount
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && !self.path.starts_with('/') {
            return Err(format!("server.health.path must start with '/', got '{}'", self.path));
        }

        Ok(())
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_owned()
}
