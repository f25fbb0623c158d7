//! Wire types for the Gemini `generateContent` and embedding endpoints.

use serde::{Deserialize, Serialize};

use weft_types::llm::{CompletionRequest, MessageRole, StopReason};

// ---------------------------------------------------------------------------
// generateContent request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerateContentRequest {
    /// Convert a generic [`CompletionRequest`] into the Gemini wire shape.
    ///
    /// Gemini takes the system prompt out-of-band (`systemInstruction`) and
    /// names the assistant role "model"; any `System` message in the list
    /// is folded into the system instruction.
    pub fn from_completion(request: &CompletionRequest) -> Self {
        let mut system_text = request.system.clone().unwrap_or_default();
        let mut contents = Vec::with_capacity(request.messages.len());

        for message in &request.messages {
            match message.role {
                MessageRole::System => {
                    if !system_text.is_empty() {
                        system_text.push('\n');
                    }
                    system_text.push_str(&message.content);
                }
                MessageRole::User => contents.push(Content {
                    role: "user".to_string(),
                    parts: vec![Part {
                        text: message.content.clone(),
                    }],
                }),
                MessageRole::Assistant => contents.push(Content {
                    role: "model".to_string(),
                    parts: vec![Part {
                        text: message.content.clone(),
                    }],
                }),
            }
        }

        let system_instruction = if system_text.is_empty() {
            None
        } else {
            Some(SystemInstruction {
                parts: vec![Part { text: system_text }],
            })
        };

        Self {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
                stop_sequences: request.stop_sequences.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// generateContent response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub response_id: Option<String>,
    pub model_version: Option<String>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Map a Gemini `finishReason` string onto the neutral [`StopReason`].
pub fn map_finish_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("STOP") => StopReason::EndTurn,
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => StopReason::Safety,
        _ => StopReason::Unspecified,
    }
}

// ---------------------------------------------------------------------------
// embedding request/response
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEmbedRequest {
    pub requests: Vec<EmbedRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedRequest {
    pub model: String,
    pub content: EmbedContent,
    pub task_type: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedContent {
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct BatchEmbedResponse {
    #[serde(default)]
    pub embeddings: Vec<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingValues {
    pub values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_types::llm::Message;

    #[test]
    fn test_from_completion_maps_roles() {
        let request = CompletionRequest {
            model: "gemini-2.0-flash".to_string(),
            messages: vec![Message::user("hi"), Message::assistant("hello")],
            system: Some("be brief".to_string()),
            max_tokens: 2048,
            temperature: Some(0.7),
            stop_sequences: None,
        };

        let wire = GenerateContentRequest::from_completion(&request);
        assert_eq!(wire.contents.len(), 2);
        assert_eq!(wire.contents[0].role, "user");
        assert_eq!(wire.contents[1].role, "model");
        assert_eq!(
            wire.system_instruction.as_ref().unwrap().parts[0].text,
            "be brief"
        );
        assert_eq!(wire.generation_config.max_output_tokens, 2048);
    }

    #[test]
    fn test_from_completion_folds_system_messages() {
        let request = CompletionRequest {
            model: "gemini-2.0-flash".to_string(),
            messages: vec![
                Message {
                    role: weft_types::llm::MessageRole::System,
                    content: "extra instruction".to_string(),
                },
                Message::user("hi"),
            ],
            system: None,
            max_tokens: 100,
            temperature: None,
            stop_sequences: None,
        };

        let wire = GenerateContentRequest::from_completion(&request);
        assert_eq!(wire.contents.len(), 1);
        assert_eq!(
            wire.system_instruction.as_ref().unwrap().parts[0].text,
            "extra instruction"
        );
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = CompletionRequest {
            model: "gemini-2.0-flash".to_string(),
            messages: vec![Message::user("hi")],
            system: None,
            max_tokens: 64,
            temperature: None,
            stop_sequences: Some(vec!["Observation:".to_string()]),
        };
        let wire = GenerateContentRequest::from_completion(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert!(json.get("generationConfig").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 64);
        assert_eq!(json["generationConfig"]["stopSequences"][0], "Observation:");
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_deserializes() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "hello there"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 3, "totalTokenCount": 7},
            "modelVersion": "gemini-2.0-flash",
            "responseId": "abc123"
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        let candidate = &parsed.candidates[0];
        assert_eq!(candidate.content.as_ref().unwrap().parts[0].text, "hello there");
        assert_eq!(map_finish_reason(candidate.finish_reason.as_deref()), StopReason::EndTurn);
        assert_eq!(parsed.usage_metadata.unwrap().prompt_token_count, 4);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason(Some("STOP")), StopReason::EndTurn);
        assert_eq!(map_finish_reason(Some("MAX_TOKENS")), StopReason::MaxTokens);
        assert_eq!(map_finish_reason(Some("SAFETY")), StopReason::Safety);
        assert_eq!(map_finish_reason(Some("OTHER")), StopReason::Unspecified);
        assert_eq!(map_finish_reason(None), StopReason::Unspecified);
    }
}
