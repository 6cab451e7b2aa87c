use serde::Deserialize;

/// Model served for prompts classified as simple
pub const DEFAULT_SIMPLE_MODEL: &str = "google/gemma-3-4b-it:free";

/// Model served for prompts classified as complex
pub const DEFAULT_COMPLEX_MODEL: &str = "stepfun/step-3.5-flash:free";

/// Word count at which a prompt is always complex
pub const DEFAULT_WORD_THRESHOLD: usize = 50;

/// Complexity routing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Backend model for simple prompts
    #[serde(default = "default_simple_model")]
    pub simple_model: String,
    /// Backend model for complex prompts
    #[serde(default = "default_complex_model")]
    pub complex_model: String,
    /// Whitespace-delimited word count that forces a complex verdict
    #[serde(default = "default_word_threshold")]
    pub word_threshold: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            simple_model: default_simple_model(),
            complex_model: default_complex_model(),
            word_threshold: DEFAULT_WORD_THRESHOLD,
        }
    }
}

impl RoutingConfig {
    /// Validate routing configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a model is blank, both labels map to the same
    /// model, or the word threshold is zero
    pub fn validate(&self) -> Result<(), String> {
        if self.simple_model.trim().is_empty() || self.complex_model.trim().is_empty() {
            return Err("routing models must not be empty".to_owned());
        }

        if self.simple_model == self.complex_model {
            return Err("routing.simple_model and routing.complex_model must differ".to_owned());
        }

        if self.word_threshold == 0 {
            return Err("routing.word_threshold must be greater than 0".to_owned());
        }

        Ok(())
    }
}

fn default_simple_model() -> String {
    DEFAULT_SIMPLE_MODEL.to_owned()
}

fn default_complex_model() -> String {
    DEFAULT_COMPLEX_MODEL.to_owned()
}

const fn default_word_threshold() -> usize {
    DEFAULT_WORD_THRESHOLD
}
