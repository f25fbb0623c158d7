//! Chain invocation adapters.
//!
//! A chain translates the current input plus the caller-owned turn history
//! into one or more model requests and extracts a displayable answer. The
//! history is only ever borrowed -- chains never mutate it; appending
//! turns is the session loop's job.

pub mod conversation;
pub mod direct;
pub mod retrieval;

use thiserror::Error;

use weft_types::chat::Turn;
use weft_types::error::{ParseError, PromptError, ToolError};
use weft_types::llm::LlmError;

use crate::retriever::RetrievalError;

pub use conversation::ConversationChain;
pub use direct::DirectChain;
pub use retrieval::{ConversationRetrievalChain, RetrievalChain};

/// Display length for retrieved source excerpts.
pub const SOURCE_PREVIEW_LEN: usize = 100;

/// Errors from chain invocation.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What a chain hands back to the session loop for display.
#[derive(Debug, Clone)]
pub struct ChainReply {
    /// The displayable answer text.
    pub answer: String,
    /// Source excerpts (already truncated to preview length), present only
    /// for retrieval-augmented chains.
    pub sources: Vec<String>,
}

impl ChainReply {
    /// A reply with no source excerpts.
    pub fn plain(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
        }
    }
}

/// Trait for chain invocation adapters.
///
/// Implementations must treat `history` as read-only; the session loop
/// owns it and appends turns itself after a successful exchange.
pub trait ChainAdapter: Send + Sync {
    fn invoke(
        &self,
        history: &[Turn],
        input: &str,
    ) -> impl std::future::Future<Output = Result<ChainReply, ChainError>> + Send;
}

/// Truncate `text` to [`SOURCE_PREVIEW_LEN`] characters for display,
/// appending an ellipsis when anything was cut.
pub fn source_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(SOURCE_PREVIEW_LEN).collect();
    if text.chars().count() > SOURCE_PREVIEW_LEN {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_preview_short_text_unchanged() {
        assert_eq!(source_preview("short"), "short");
    }

    #[test]
    fn test_source_preview_truncates_long_text() {
        let long = "x".repeat(250);
        let preview = source_preview(&long);
        assert_eq!(preview.len(), SOURCE_PREVIEW_LEN + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_source_preview_exact_boundary() {
        let text = "y".repeat(SOURCE_PREVIEW_LEN);
        assert_eq!(source_preview(&text), text);
    }

    #[test]
    fn test_source_preview_multibyte_safe() {
        let text = "é".repeat(150);
        let preview = source_preview(&text);
        assert_eq!(preview.chars().count(), SOURCE_PREVIEW_LEN + 3);
    }
}
