//! GeminiChatModel -- concrete [`ChatModel`] implementation for the
//! Generative Language API (`models/{model}:generateContent`).

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use weft_core::llm::ChatModel;
use weft_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use super::types::{map_finish_reason, GenerateContentRequest, GenerateContentResponse};
use super::DEFAULT_BASE_URL;

/// Gemini chat-model provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the request header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct GeminiChatModel {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiChatModel {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

// GeminiChatModel intentionally does NOT derive Debug; the SecretString
// field already refuses to print the key, and omitting Debug entirely
// keeps the rest of the client state out of logs too.

impl ChatModel for GeminiChatModel {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = GenerateContentRequest::from_completion(request);
        let url = self.url(&request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                400 if error_body.contains("API_KEY_INVALID") => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        if let Some(feedback) = &gemini_resp.prompt_feedback {
            if feedback.block_reason.is_some() {
                return Err(LlmError::Blocked);
            }
        }

        let candidate = gemini_resp
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyCompletion)?;

        let stop_reason = map_finish_reason(candidate.finish_reason.as_deref());

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if content.is_empty() {
            // A safety stop with no text is a block, not a truncation.
            return Err(if stop_reason == StopReason::Safety {
                LlmError::Blocked
            } else {
                LlmError::EmptyCompletion
            });
        }

        let usage = gemini_resp
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: gemini_resp.response_id.unwrap_or_default(),
            content,
            model: gemini_resp
                .model_version
                .unwrap_or_else(|| request.model.clone()),
            stop_reason,
            usage,
        })
    }
}
