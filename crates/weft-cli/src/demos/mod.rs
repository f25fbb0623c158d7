//! Demo implementations and shared provider wiring.
//!
//! API keys are passed through as-is (empty when unset) so a missing key
//! surfaces as an authentication error from the provider at call time,
//! matching how the chains report every other provider failure.

pub mod agent;
pub mod conversation;
pub mod memory;
pub mod parser;
pub mod retrieval;

use anyhow::{Context, Result};
use secrecy::SecretString;

use weft_infra::llm::gemini::{GeminiChatModel, GeminiEmbedder};
use weft_infra::loader::{chunk_document, WebLoader};
use weft_infra::vector::EmbeddingRetriever;
use weft_types::config::AppConfig;

/// Profile page scraped by the retrieval demos.
pub(crate) const PROFILE_URL: &str =
    "https://www.weekday.works/people/vishwas-gopinath-vishwas-gopinath-0020a09b";

/// CSS selector used for all page extraction.
pub(crate) const PAGE_SELECTOR: &str = "p";

pub(crate) fn chat_model(config: &AppConfig) -> GeminiChatModel {
    let key = config.gemini_api_key.clone().unwrap_or_default();
    GeminiChatModel::new(SecretString::from(key))
}

pub(crate) fn embedder(config: &AppConfig) -> GeminiEmbedder {
    let key = config.gemini_api_key.clone().unwrap_or_default();
    GeminiEmbedder::new(SecretString::from(key), &config.embedding_model)
}

/// Scrape `url`, chunk it, embed the chunks, and build a retriever.
pub(crate) async fn indexed_retriever(
    config: &AppConfig,
    url: &str,
) -> Result<EmbeddingRetriever<GeminiEmbedder>> {
    let loader = WebLoader::new();
    let document = loader
        .load(url, PAGE_SELECTOR)
        .await
        .with_context(|| format!("loading {url}"))?;
    println!("Loaded document: {} chars", document.content.len());

    let chunks = chunk_document(&document);
    println!("Split into {} chunks", chunks.len());

    let retriever = EmbeddingRetriever::index(embedder(config), chunks)
        .await
        .context("embedding document chunks")?;
    Ok(retriever)
}
