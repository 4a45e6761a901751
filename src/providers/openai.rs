/*!
 * OpenAI-compatible chat completions client.
 *
 * All stage prompts are completed through the chat completions endpoint in
 * JSON mode, so the response content is a single JSON object that stages
 * parse against their payload schema.
 */

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::ProviderSettings;
use crate::errors::ProviderError;

use super::{GenerationClient, GenerationRequest, GenerationResponse};

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    role: String,

    /// Content of the message
    content: String,
}

/// Response format directive for JSON mode
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// The model to use
    model: String,

    /// Conversation messages
    messages: Vec<ChatMessage>,

    /// Response format directive
    response_format: ResponseFormat,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// OpenAI-compatible API client
#[derive(Debug)]
pub struct OpenAiClient {
    /// HTTP client for API requests
    client: Client,

    /// API key for authentication
    api_key: String,

    /// Base endpoint URL, without trailing slash
    endpoint: String,

    /// Model name
    model: String,
}

impl OpenAiClient {
    /// Create a new client from provider settings.
    ///
    /// The endpoint is validated up front so a malformed URL fails at
    /// construction rather than on the first stage call.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let endpoint = settings.endpoint.trim_end_matches('/').to_string();
        Url::parse(&endpoint).map_err(|e| {
            ProviderError::ConnectionError(format!("Invalid endpoint '{}': {}", endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            endpoint,
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    async fn invoke(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let api_url = format!("{}/chat/completions", self.endpoint);

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!(
                "Generation API error for stage {} ({}): {}",
                request.stage, status, error_text
            );
            return match status.as_u16() {
                401 | 403 => Err(ProviderError::AuthenticationError(error_text)),
                429 => Err(ProviderError::RateLimitExceeded(error_text)),
                code => Err(ProviderError::ApiError {
                    status_code: code,
                    message: error_text,
                }),
            };
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::ParseError("response contained no choices".to_string())
            })?;

        Ok(GenerationResponse { content })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let api_url = format!("{}/models", self.endpoint);

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("connection test failed with status {}", status),
            });
        }

        Ok(())
    }
}
