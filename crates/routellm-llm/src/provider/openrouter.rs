//! `OpenRouter` (`OpenAI`-compatible) backend implementation

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use routellm_config::UpstreamConfig;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Backend, BackendError, Completion};
use crate::protocol::{ChatRequest, ChatResponse};

/// Backend speaking the `OpenAI` chat completions protocol
pub struct OpenRouterBackend {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl OpenRouterBackend {
    /// Create from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Config` if the timeout or attribution headers
    /// are invalid, or the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self, BackendError> {
        let timeout = config.timeout_duration().map_err(BackendError::Config)?;

        let mut headers = HeaderMap::new();
        if let Some(referer) = &config.referer {
            headers.insert(reqwest::header::REFERER, header_value(referer)?);
        }
        if let Some(title) = &config.title {
            headers.insert(HeaderName::from_static("x-title"), header_value(title)?);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        if config.api_key.is_none() {
            tracing::warn!(base_url = %config.base_url, "no upstream API key configured");
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

fn header_value(value: &str) -> Result<HeaderValue, BackendError> {
    HeaderValue::try_from(value).map_err(|e| BackendError::Config(format!("invalid header value '{value}': {e}")))
}

#[async_trait]
impl Backend for OpenRouterBackend {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, BackendError> {
        let wire_request = ChatRequest::user_prompt(model, prompt);

        let mut builder = self.client.post(self.completions_url()).json(&wire_request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(model, error = %e, "upstream request failed");
            BackendError::from(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model, status = %status, "upstream returned error");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let wire_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let text = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("response contained no choices".to_owned()))?
            .message
            .content
            .unwrap_or_default();

        let usage = wire_response.usage.unwrap_or_default();

        Ok(Completion {
            text,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        })
    }
}
