//! Session-lifetime vector store with cosine similarity search.
//!
//! The demos index one scraped page per run, so the store holds its
//! entries in a plain `Vec` and scans on every query; there is no
//! persistence and no approximate index. `EmbeddingRetriever` pairs the
//! store with an `Embedder` to implement the core `Retriever` port.

use tracing::info;

use weft_core::llm::{EmbedPurpose, Embedder};
use weft_core::retriever::{RetrievalError, Retriever};
use weft_types::document::{DocumentChunk, ScoredChunk};

/// Cosine similarity of two vectors; 0.0 when either has zero magnitude
/// or the lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}

/// In-memory store of chunks and their embeddings.
#[derive(Default)]
pub struct MemoryVectorStore {
    entries: Vec<(DocumentChunk, Vec<f32>)>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, chunk: DocumentChunk, embedding: Vec<f32>) {
        self.entries.push((chunk, embedding));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-`k` entries by cosine similarity to `query`, best first.
    /// Ties keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (_, embedding))| (i, cosine_similarity(query, embedding)))
            .collect();

        scored.sort_by(|(ia, sa), (ib, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ia.cmp(ib))
        });

        scored
            .into_iter()
            .take(k)
            .map(|(i, score)| ScoredChunk {
                chunk: self.entries[i].0.clone(),
                score,
            })
            .collect()
    }
}

/// A [`Retriever`] over a [`MemoryVectorStore`] populated through an
/// `Embedder`.
pub struct EmbeddingRetriever<E: Embedder> {
    embedder: E,
    store: MemoryVectorStore,
}

impl<E: Embedder> EmbeddingRetriever<E> {
    /// Embed `chunks` and build a retriever over them.
    pub async fn index(
        embedder: E,
        chunks: Vec<DocumentChunk>,
    ) -> Result<Self, RetrievalError> {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = embedder.embed(&texts, EmbedPurpose::Document).await?;

        if embeddings.len() != chunks.len() {
            return Err(RetrievalError::Store(format!(
                "embedded {} of {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let mut store = MemoryVectorStore::new();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            store.add(chunk, embedding);
        }
        info!(chunks = store.len(), "indexed chunks into vector store");

        Ok(Self { embedder, store })
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<E: Embedder> Retriever for EmbeddingRetriever<E> {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, RetrievalError> {
        let embeddings = self
            .embedder
            .embed(&[query.to_string()], EmbedPurpose::Query)
            .await?;
        let query_vec = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Store("embedder returned no query vector".to_string()))?;

        Ok(self.store.search(&query_vec, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, index: usize) -> DocumentChunk {
        DocumentChunk {
            content: content.to_string(),
            source: None,
            index,
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_length_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let mut store = MemoryVectorStore::new();
        store.add(chunk("far", 0), vec![0.0, 1.0]);
        store.add(chunk("near", 1), vec![1.0, 0.05]);
        store.add(chunk("nearest", 2), vec![1.0, 0.0]);

        let hits = store.search(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.content, "nearest");
        assert_eq!(hits[1].chunk.content, "near");
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_search_k_larger_than_store() {
        let mut store = MemoryVectorStore::new();
        store.add(chunk("only", 0), vec![1.0, 0.0]);

        let hits = store.search(&[1.0, 0.0], 5);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_empty_store() {
        let store = MemoryVectorStore::new();
        assert!(store.search(&[1.0, 0.0], 3).is_empty());
    }

    #[test]
    fn test_search_ties_keep_insertion_order() {
        let mut store = MemoryVectorStore::new();
        store.add(chunk("first", 0), vec![1.0, 0.0]);
        store.add(chunk("second", 1), vec![2.0, 0.0]);

        let hits = store.search(&[1.0, 0.0], 2);
        assert_eq!(hits[0].chunk.content, "first");
        assert_eq!(hits[1].chunk.content, "second");
    }

    /// Embedder that maps each known text onto a fixed axis vector.
    struct AxisEmbedder;

    impl Embedder for AxisEmbedder {
        fn dimension(&self) -> usize {
            3
        }

        async fn embed(
            &self,
            texts: &[String],
            _purpose: EmbedPurpose,
        ) -> Result<Vec<Vec<f32>>, weft_types::llm::LlmError> {
            Ok(texts
                .iter()
                .map(|t| match t.as_str() {
                    "apples" | "about apples" => vec![1.0, 0.0, 0.0],
                    "bears" => vec![0.0, 1.0, 0.0],
                    _ => vec![0.0, 0.0, 1.0],
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_embedding_retriever_end_to_end() {
        let chunks = vec![chunk("apples", 0), chunk("bears", 1), chunk("other", 2)];
        let retriever = EmbeddingRetriever::index(AxisEmbedder, chunks).await.unwrap();
        assert_eq!(retriever.len(), 3);

        let hits = retriever.retrieve("about apples", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.content, "apples");
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }
}
