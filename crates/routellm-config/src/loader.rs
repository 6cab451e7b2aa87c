use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if any section is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.routing.validate().map_err(anyhow::Error::msg)?;
        self.pricing.validate().map_err(anyhow::Error::msg)?;
        self.ledger.validate().map_err(anyhow::Error::msg)?;
        self.upstream.timeout_duration().map_err(anyhow::Error::msg)?;
        self.validate_signup()?;
        self.server.health.validate().map_err(anyhow::Error::msg)?;
        Ok(())
    }

    fn validate_signup(&self) -> anyhow::Result<()> {
        if self.signup.enabled && self.signup.usage_limit == 0 {
            anyhow::bail!("signup.usage_limit must be greater than 0 when signup is enabled");
        }

        Ok(())
    }
}
