//! OpenAI provider implementation
//!
//! Speaks the `/chat/completions` wire format of OpenAI and compatible
//! services, asking for a strict `json_schema` response format. One call to
//! [`Provider::complete`] is one HTTP request: there is no retry, no
//! streaming, and no timeout beyond the transport defaults.

use crate::config::ProviderConfig;
use crate::error::{CodError, Result};
use crate::providers::{
    CompletionResponse, Conversation, Message, Provider, ResponseFormat, TokenUsage,
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// OpenAI chat completions provider
///
/// # Examples
///
/// ```no_run
/// use chain_of_density::config::ProviderConfig;
/// use chain_of_density::providers::OpenAiProvider;
///
/// # fn example() -> chain_of_density::error::Result<()> {
/// // Reads the key from OPENAI_API_KEY
/// let provider = OpenAiProvider::new(ProviderConfig::default())?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    response_format: &'a ResponseFormat,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl OpenAiProvider {
    /// Create a provider, reading the API key from the environment variable
    /// named by `config.api_key_env`
    ///
    /// # Errors
    ///
    /// Returns `CodError::Authentication` if the variable is unset or blank
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CodError::Authentication(format!(
                    "{} is not set; export it or add it to a .env file",
                    config.api_key_env
                ))
            })?;

        Self::with_api_key(config, api_key)
    }

    /// Create a provider with an explicit API key
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn with_api_key(config: ProviderConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cod/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CodError::RemoteService(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenAI provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

/// Map a non-success HTTP status and its body onto the error taxonomy
fn classify_error(status: StatusCode, body: &str, model: &str) -> CodError {
    let detail = serde_json::from_str::<OpenAiErrorBody>(body)
        .map(|b| b.error)
        .ok();
    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());
    let code = detail
        .as_ref()
        .and_then(|d| d.code.as_ref())
        .and_then(|c| c.as_str())
        .unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        CodError::Authentication(format!("API key rejected ({}): {}", status, message))
    } else if status == StatusCode::NOT_FOUND || code == "model_not_found" {
        CodError::Configuration(format!("Unknown model '{}': {}", model, message))
    } else {
        CodError::RemoteService(format!("API returned error {}: {}", status, message))
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(
        &self,
        conversation: &Conversation,
        response_format: &ResponseFormat,
    ) -> Result<CompletionResponse> {
        let request = OpenAiRequest {
            model: &self.config.model,
            messages: conversation.messages(),
            response_format,
        };

        let url = self.completions_url();
        tracing::debug!(
            "Sending OpenAI request to {}: {} messages",
            url,
            request.messages.len()
        );

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {}", e);
                CodError::RemoteService(format!("Request to {} failed: {}", url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI returned error {}: {}", status, error_text);
            return Err(classify_error(status, &error_text, &self.config.model).into());
        }

        let body: OpenAiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CodError::RemoteService(format!("Failed to parse API response: {}", e))
        })?;

        tracing::debug!("OpenAI responded in {:?}", started.elapsed());

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CodError::RemoteService("Response contained no choices".to_string()))?;

        if let Some(refusal) = choice.message.refusal {
            return Err(CodError::RemoteService(format!("Model refused: {}", refusal)).into());
        }

        if choice.finish_reason.as_deref() == Some("length") {
            return Err(CodError::RemoteService(
                "Response was truncated before the structured output was complete".to_string(),
            )
            .into());
        }

        let content = choice
            .message
            .content
            .ok_or_else(|| {
                CodError::RemoteService("Response message has no content".to_string())
            })?;

        let mut completion = CompletionResponse::new(content);
        if let Some(usage) = body.usage {
            let usage = TokenUsage::new(usage.prompt_tokens, usage.completion_tokens);
            completion = completion.with_usage(usage);
        }

        Ok(completion)
    }
}
