//! Embedder trait definition.
//!
//! Abstraction over text-embedding backends. Implementations live in
//! weft-infra (e.g. `GeminiEmbedder`).

use weft_types::llm::LlmError;

/// What an embedding will be used for.
///
/// Retrieval-tuned embedding models produce different vectors for corpus
/// documents and for search queries; callers must say which side they are
/// embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPurpose {
    /// Embedding a corpus document for storage.
    Document,
    /// Embedding a search query.
    Query,
}

/// Trait for text-embedding backends.
pub trait Embedder: Send + Sync {
    /// The dimensionality of vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts. Returns one vector per input, in order.
    fn embed(
        &self,
        texts: &[String],
        purpose: EmbedPurpose,
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, LlmError>> + Send;
}
