//! Retriever port.
//!
//! A retriever returns the stored document chunks most relevant to a
//! query. The embedding-backed implementation lives in weft-infra; the
//! agent's retriever tool and the retrieval chains consume this trait.

use thiserror::Error;

use weft_types::document::ScoredChunk;
use weft_types::llm::LlmError;

/// Errors from retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] LlmError),

    #[error("vector store error: {0}")]
    Store(String),
}

/// Trait for components that return relevant chunks for a query.
pub trait Retriever: Send + Sync {
    /// Return up to `k` chunks most relevant to `query`, best first.
    fn retrieve(
        &self,
        query: &str,
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ScoredChunk>, RetrievalError>> + Send;
}
