//! In-memory vector store and embedding-backed retriever.

pub mod store;

pub use store::{EmbeddingRetriever, MemoryVectorStore};
