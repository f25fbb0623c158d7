//! Direct model invocation without tools, retrieval, or history.
//!
//! Used for the one-shot prompt demo and as the single fallback attempt
//! when a richer chain fails: the input goes to the model as-is.

use tracing::{Instrument, info_span};

use weft_types::chat::Turn;
use weft_types::llm::CompletionRequest;

use crate::llm::ChatModel;

use super::{ChainAdapter, ChainError, ChainReply};

/// A chain that forwards the input straight to the chat model.
pub struct DirectChain<M: ChatModel> {
    model: M,
    model_id: String,
    max_tokens: u32,
}

impl<M: ChatModel> DirectChain<M> {
    pub fn new(model: M, model_id: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            max_tokens,
        }
    }
}

impl<M: ChatModel> ChainAdapter for DirectChain<M> {
    async fn invoke(&self, _history: &[Turn], input: &str) -> Result<ChainReply, ChainError> {
        let request = CompletionRequest::single_user(&self.model_id, input, self.max_tokens);

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.provider.name = self.model.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
        );

        let response = self.model.complete(&request).instrument(span).await?;
        Ok(ChainReply::plain(response.content))
    }
}
