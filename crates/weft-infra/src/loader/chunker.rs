//! Text chunker for retrieval indexing.
//!
//! Uses the `text-splitter` crate to split a document into overlapping
//! chunks sized for embedding: 200 characters with 20 characters of
//! overlap, respecting semantic boundaries (paragraphs, sentences, words)
//! where the text allows.

use text_splitter::{ChunkConfig, TextSplitter};

use weft_types::document::{Document, DocumentChunk};

/// Target chunk size in characters.
pub const CHUNK_SIZE: usize = 200;

/// Overlap between adjacent chunks in characters.
pub const CHUNK_OVERLAP: usize = 20;

/// Split a document into overlapping chunks for embedding.
///
/// Chunk indices are assigned in document order starting at 0; every chunk
/// inherits the document's source.
pub fn chunk_document(document: &Document) -> Vec<DocumentChunk> {
    let config = ChunkConfig::new(CHUNK_SIZE)
        .with_overlap(CHUNK_OVERLAP)
        .expect("overlap is smaller than chunk size");
    let splitter = TextSplitter::new(config);

    splitter
        .chunks(&document.content)
        .enumerate()
        .map(|(index, chunk)| DocumentChunk {
            content: chunk.to_string(),
            source: document.source.clone(),
            index,
        })
        .collect()
}
