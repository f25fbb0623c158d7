//! LLM provider and embedder ports.

pub mod embedder;
pub mod provider;

pub use embedder::{EmbedPurpose, Embedder};
pub use provider::ChatModel;
