//! Document loading and chunking for the retrieval pipeline.

pub mod chunker;
pub mod web;

pub use chunker::chunk_document;
pub use web::WebLoader;
