//! ChatModel trait definition.
//!
//! This is the core abstraction over chat-model backends. Uses native
//! async fn in traits (RPITIT, Rust 2024 edition); implementations live
//! in weft-infra (e.g. `GeminiChatModel`).

use weft_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-model backends.
pub trait ChatModel: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
