//! Backend trait and implementations for upstream LLM services

pub mod openrouter;

use async_trait::async_trait;
use thiserror::Error;

pub use openrouter::OpenRouterBackend;

/// Text and token usage of one completed backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Tokens in the prompt
    pub prompt_tokens: u64,
    /// Tokens in the completion
    pub completion_tokens: u64,
    /// Total tokens charged for the call
    pub total_tokens: u64,
}

/// Errors from an upstream backend call
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection or transport failure
    #[error("request to backend failed: {0}")]
    Transport(String),

    /// Backend did not answer within the configured timeout
    #[error("backend timed out")]
    Timeout,

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body could not be interpreted
    #[error("failed to parse backend response: {0}")]
    Decode(String),

    /// Backend could not be constructed from configuration
    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl BackendError {
    /// HTTP status received from the backend, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Trait implemented by each upstream LLM backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Send `prompt` as a single user message to `model`
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, BackendError>;
}
