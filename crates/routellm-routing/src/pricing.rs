//! Per-model cost estimation

use std::collections::HashMap;

use routellm_config::{ModelPrice, PricingConfig};

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Static price table lookup
///
/// Models missing from the table cost nothing.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    prices: HashMap<String, ModelPrice>,
}

impl CostEstimator {
    /// Build an estimator from pricing configuration
    pub fn from_config(config: &PricingConfig) -> Self {
        Self {
            prices: config.models.iter().map(|(model, price)| (model.clone(), *price)).collect(),
        }
    }

    /// Estimated cost in USD for a completed request
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&self, model: &str, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        let Some(price) = self.prices.get(model) else {
            return 0.0;
        };

        let prompt_cost = (prompt_tokens as f64 / TOKENS_PER_MILLION) * price.prompt_per_mtok;
        let completion_cost = (completion_tokens as f64 / TOKENS_PER_MILLION) * price.completion_per_mtok;
        prompt_cost + completion_cost
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn estimator() -> CostEstimator {
        let config: PricingConfig = toml::from_str(
            r#"
            [models."google/gemma-3-4b-it:free"]

            [models."openai/gpt-4o"]
            prompt_per_mtok = 2.5
            completion_per_mtok = 10.0
            "#,
        )
        .unwrap();
        CostEstimator::from_config(&config)
    }

    #[test]
    fn free_model_costs_exactly_zero() {
        let estimator = estimator();
        assert_eq!(estimator.estimate("google/gemma-3-4b-it:free", 0, 0), 0.0);
        assert_eq!(estimator.estimate("google/gemma-3-4b-it:free", 1_000_000, 5_000_000), 0.0);
    }

    #[test]
    fn unknown_model_costs_zero() {
        assert_eq!(estimator().estimate("mystery/model", 123_456, 654_321), 0.0);
    }

    #[test]
    fn paid_model_cost() {
        let cost = estimator().estimate("openai/gpt-4o", 1_000_000, 500_000);
        assert!((cost - 7.5).abs() < 1e-9);
    }

    #[test]
    fn default_table_prices_routed_models_at_zero() {
        let estimator = CostEstimator::from_config(&PricingConfig::default());
        assert_eq!(estimator.estimate("stepfun/step-3.5-flash:free", 800, 400), 0.0);
    }
}
