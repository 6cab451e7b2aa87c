use indexmap::IndexMap;
use serde::Deserialize;

use crate::routing::{DEFAULT_COMPLEX_MODEL, DEFAULT_SIMPLE_MODEL};

/// Per-model price table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Prices keyed by backend model identifier
    #[serde(default = "default_models")]
    pub models: IndexMap<String, ModelPrice>,
}

/// USD prices per million tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelPrice {
    /// Cost per million prompt tokens
    #[serde(default)]
    pub prompt_per_mtok: f64,
    /// Cost per million completion tokens
    #[serde(default)]
    pub completion_per_mtok: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
        }
    }
}

impl PricingConfig {
    /// Validate the price table
    ///
    /// # Errors
    ///
    /// Returns an error if any price is negative or not finite
    pub fn validate(&self) -> Result<(), String> {
        for (model, price) in &self.models {
            let valid = |p: f64| p.is_finite() && p >= 0.0;
            if !valid(price.prompt_per_mtok) || !valid(price.completion_per_mtok) {
                return Err(format!("pricing for model '{model}' must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

fn default_models() -> IndexMap<String, ModelPrice> {
    let mut models = IndexMap::new();
    models.insert(DEFAULT_SIMPLE_MODEL.to_owned(), ModelPrice::default());
    models.insert(DEFAULT_COMPLEX_MODEL.to_owned(), ModelPrice::default());
    models
}
