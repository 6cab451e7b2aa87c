//! Static classification to model mapping

use routellm_config::RoutingConfig;
use routellm_core::Classification;

/// Maps a classification to the backend model that serves it
#[derive(Debug, Clone)]
pub struct ModelSelector {
    simple_model: String,
    complex_model: String,
}

impl ModelSelector {
    /// Create a selector from explicit model identifiers
    pub fn new(simple_model: impl Into<String>, complex_model: impl Into<String>) -> Self {
        Self {
            simple_model: simple_model.into(),
            complex_model: complex_model.into(),
        }
    }

    /// Build a selector from routing configuration
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.simple_model.clone(), config.complex_model.clone())
    }

    /// Model for the given classification
    pub fn select(&self, classification: Classification) -> &str {
        match classification {
            Classification::Simple => &self.simple_model,
            Classification::Complex => &self.complex_model,
        }
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
