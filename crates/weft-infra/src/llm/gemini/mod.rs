//! Gemini provider -- concrete [`ChatModel`] and `Embedder` implementations
//! for the Google Generative Language API.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

mod client;
mod embeddings;
mod types;

pub use client::GeminiChatModel;
pub use embeddings::{GeminiEmbedder, EMBEDDING_DIMENSION};

/// Default base URL for the Generative Language API.
pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
