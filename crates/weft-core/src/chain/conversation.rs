//! Conversation chain: history-in-prompt chat.
//!
//! Each invocation renders the caller's turn history into the prompt so
//! the model can give context-aware answers. Persistence of that history
//! is the caller's concern (see `weft_core::history`).

use std::collections::HashMap;

use tracing::{Instrument, info_span};

use weft_types::chat::{render_turns, Turn};
use weft_types::llm::{CompletionRequest, Message};

use crate::llm::ChatModel;
use crate::prompt::PromptTemplate;

use super::{ChainAdapter, ChainError, ChainReply};

/// Template for the human side of each exchange.
const CONVERSATION_TEMPLATE: &str = "Previous conversation:\n{history}\n\nHuman: {input}";

/// A chain that folds the running conversation into each model request.
pub struct ConversationChain<M: ChatModel> {
    model: M,
    model_id: String,
    max_tokens: u32,
    system: String,
    template: PromptTemplate,
}

impl<M: ChatModel> ConversationChain<M> {
    pub fn new(
        model: M,
        model_id: impl Into<String>,
        max_tokens: u32,
        system: impl Into<String>,
    ) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            max_tokens,
            system: system.into(),
            template: PromptTemplate::new(CONVERSATION_TEMPLATE),
        }
    }
}

impl<M: ChatModel> ChainAdapter for ConversationChain<M> {
    async fn invoke(&self, history: &[Turn], input: &str) -> Result<ChainReply, ChainError> {
        let mut vars = HashMap::new();
        vars.insert("history", render_turns(history));
        vars.insert("input", input.to_string());
        let content = self.template.render(&vars)?;

        let request = CompletionRequest {
            model: self.model_id.clone(),
            messages: vec![Message::user(content)],
            system: Some(self.system.clone()),
            max_tokens: self.max_tokens,
            temperature: None,
            stop_sequences: None,
        };

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.provider.name = self.model.name(),
            gen_ai.request.model = %request.model,
            history_turns = history.len(),
        );

        let response = self.model.complete(&request).instrument(span).await?;
        Ok(ChainReply::plain(response.content))
    }
}
