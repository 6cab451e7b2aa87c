//! Complexity-based model routing for `RouteLLM`
//!
//! - **Classifier**: labels a prompt SIMPLE or COMPLEX
//! - **Selector**: maps the label to a backend model
//! - **Pricing**: estimates the cost of a completed request

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod classifier;
pub mod pricing;
pub mod selector;

use routellm_config::RoutingConfig;
use routellm_core::Classification;

pub use classifier::{Classifier, Reason, Verdict};
pub use pricing::CostEstimator;
pub use selector::ModelSelector;

/// Result of a routing decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Prompt label
    pub classification: Classification,
    /// Selected model identifier
    pub model: String,
    /// Why the label was assigned
    pub reason: Reason,
}

/// Classifier and selector bundled together
#[derive(Debug, Clone, Default)]
pub struct ComplexityRouter {
    classifier: Classifier,
    selector: ModelSelector,
}

impl ComplexityRouter {
    /// Build a router from configuration
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            classifier: Classifier::new(config.word_threshold),
            selector: ModelSelector::from_config(config),
        }
    }

    /// Model serving prompts with the given label
    pub fn model_for(&self, classification: Classification) -> &str {
        self.selector.select(classification)
    }

    /// Classify a prompt and pick its model
    pub fn route(&self, prompt: &str) -> RoutingDecision {
        let verdict = self.classifier.classify(prompt);
        let model = self.selector.select(verdict.classification).to_owned();

        tracing::info!(
            classification = %verdict.classification,
            reason = ?verdict.reason,
            words = verdict.word_count,
            model = %model,
            "prompt classified"
        );

        RoutingDecision {
            classification: verdict.classification,
            model,
            reason: verdict.reason,
        }
    }
}
