//! Document and chunk types for the retrieval pipeline.
//!
//! A `Document` is the raw text pulled from one source (a scraped web
//! page). A `DocumentChunk` is one splitter-produced piece of a document,
//! the unit of embedding and retrieval. A `ScoredChunk` pairs a chunk with
//! its similarity score for a query.

use serde::{Deserialize, Serialize};

/// Raw text loaded from a single source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    /// Where the content came from (e.g. the URL it was scraped from).
    pub source: Option<String>,
}

impl Document {
    pub fn new(content: impl Into<String>, source: Option<String>) -> Self {
        Self {
            content: content.into(),
            source,
        }
    }
}

/// One splitter-produced piece of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub content: String,
    pub source: Option<String>,
    /// Position of this chunk within its parent document, starting at 0.
    pub index: usize,
}

/// A chunk paired with its cosine similarity to a query embedding.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}
