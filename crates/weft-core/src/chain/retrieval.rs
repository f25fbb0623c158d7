//! Retrieval-augmented chains.
//!
//! `RetrievalChain` stuffs the top-k retrieved chunks into the prompt and
//! answers a standalone question. `ConversationRetrievalChain` adds a
//! history-aware step: the model first rewrites the question into a
//! standalone search query using the conversation so far, and the final
//! answer prompt carries the history as messages.

use std::collections::HashMap;

use tracing::{Instrument, debug, info_span};

use weft_types::chat::{render_turns, Speaker, Turn};
use weft_types::document::ScoredChunk;
use weft_types::llm::{CompletionRequest, Message, MessageRole};

use crate::llm::ChatModel;
use crate::prompt::PromptTemplate;
use crate::retriever::Retriever;

use super::{source_preview, ChainAdapter, ChainError, ChainReply};

/// How many chunks the retrieval chains pull per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Template for the standalone retrieval QA prompt.
const RETRIEVAL_TEMPLATE: &str = "Answer the users question.\nContext: {context}\nQuestion: {input}";

/// System preamble for the history-aware answer step.
const CONVERSATION_RETRIEVAL_SYSTEM: &str =
    "You are a helpful assistant. Answer the users question. Context: {context}";

/// Instruction appended to the history when rewriting the query.
const REPHRASE_INSTRUCTION: &str = "Given the chat history and input, generate a search query \
     to look up information relevant to the conversation. Reply with the query only.";

/// Join retrieved chunks into the `{context}` block.
fn format_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|s| s.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Turn chunks into display previews.
fn previews(chunks: &[ScoredChunk]) -> Vec<String> {
    chunks.iter().map(|s| source_preview(&s.chunk.content)).collect()
}

/// Retrieval QA over a vector store: retrieve, stuff, answer.
pub struct RetrievalChain<M: ChatModel, R: Retriever> {
    model: M,
    retriever: R,
    model_id: String,
    max_tokens: u32,
    top_k: usize,
    template: PromptTemplate,
}

impl<M: ChatModel, R: Retriever> RetrievalChain<M, R> {
    pub fn new(model: M, retriever: R, model_id: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model,
            retriever,
            model_id: model_id.into(),
            max_tokens,
            top_k: DEFAULT_TOP_K,
            template: PromptTemplate::new(RETRIEVAL_TEMPLATE),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

impl<M: ChatModel, R: Retriever> ChainAdapter for RetrievalChain<M, R> {
    async fn invoke(&self, _history: &[Turn], input: &str) -> Result<ChainReply, ChainError> {
        let hits = self.retriever.retrieve(input, self.top_k).await?;
        debug!(hits = hits.len(), "retrieved context chunks");

        let mut vars = HashMap::new();
        vars.insert("context", format_context(&hits));
        vars.insert("input", input.to_string());
        let content = self.template.render(&vars)?;

        let request = CompletionRequest::single_user(&self.model_id, content, self.max_tokens);

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.provider.name = self.model.name(),
            gen_ai.request.model = %request.model,
            retrieved_chunks = hits.len(),
        );

        let response = self.model.complete(&request).instrument(span).await?;
        Ok(ChainReply {
            answer: response.content,
            sources: previews(&hits),
        })
    }
}

/// History-aware retrieval QA: rewrite the query from the conversation,
/// retrieve, then answer with the history in context.
pub struct ConversationRetrievalChain<M: ChatModel, R: Retriever> {
    model: M,
    retriever: R,
    model_id: String,
    max_tokens: u32,
    top_k: usize,
}

impl<M: ChatModel, R: Retriever> ConversationRetrievalChain<M, R> {
    pub fn new(model: M, retriever: R, model_id: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model,
            retriever,
            model_id: model_id.into(),
            max_tokens,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Rewrite `input` into a standalone search query using the history.
    ///
    /// With no history the input already stands alone and no model call is
    /// spent.
    async fn standalone_query(&self, history: &[Turn], input: &str) -> Result<String, ChainError> {
        if history.is_empty() {
            return Ok(input.to_string());
        }

        let content = format!(
            "{}\nUser: {}\n\n{}",
            render_turns(history),
            input,
            REPHRASE_INSTRUCTION
        );
        let request = CompletionRequest::single_user(&self.model_id, content, self.max_tokens);

        let span = info_span!(
            "gen_ai.rephrase",
            gen_ai.provider.name = self.model.name(),
            gen_ai.request.model = %request.model,
        );

        let response = self.model.complete(&request).instrument(span).await?;
        let query = response.content.trim().to_string();
        debug!(%query, "rewrote input into standalone query");
        Ok(query)
    }
}

fn history_messages(history: &[Turn]) -> Vec<Message> {
    history
        .iter()
        .map(|t| Message {
            role: match t.speaker {
                Speaker::User => MessageRole::User,
                Speaker::Assistant => MessageRole::Assistant,
            },
            content: t.text.clone(),
        })
        .collect()
}

impl<M: ChatModel, R: Retriever> ChainAdapter for ConversationRetrievalChain<M, R> {
    async fn invoke(&self, history: &[Turn], input: &str) -> Result<ChainReply, ChainError> {
        let query = self.standalone_query(history, input).await?;
        let hits = self.retriever.retrieve(&query, self.top_k).await?;

        let mut vars = HashMap::new();
        vars.insert("context", format_context(&hits));
        let system = PromptTemplate::new(CONVERSATION_RETRIEVAL_SYSTEM).render(&vars)?;

        let mut messages = history_messages(history);
        messages.push(Message::user(input));

        let request = CompletionRequest {
            model: self.model_id.clone(),
            messages,
            system: Some(system),
            max_tokens: self.max_tokens,
            temperature: None,
            stop_sequences: None,
        };

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.provider.name = self.model.name(),
            gen_ai.request.model = %request.model,
            retrieved_chunks = hits.len(),
            history_turns = history.len(),
        );

        let response = self.model.complete(&request).instrument(span).await?;
        Ok(ChainReply {
            answer: response.content,
            sources: previews(&hits),
        })
    }
}
