//! Demo 5: interactive chat with database-backed memory.
//!
//! History for a named thread is loaded from Postgres at startup and every
//! committed exchange is appended, so the conversation picks up where it
//! left off across runs. When Postgres is unreachable the demo still runs
//! against an in-memory store, without persistence.

use anyhow::Result;
use console::style;

use weft_core::chain::{ConversationChain, DirectChain};
use weft_core::chat::SessionEngine;
use weft_core::history::{MemoryTranscriptRepository, TranscriptRepository};
use weft_infra::postgres::{connect, PgTranscriptRepository};
use weft_types::chat::Transcript;
use weft_types::config::AppConfig;

/// Thread name all runs of this demo share.
const THREAD: &str = "memory_demo";

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the conversation history to \
     provide context-aware responses.";

pub async fn run(config: &AppConfig) -> Result<()> {
    match connect(&config.postgres).await {
        Ok(pool) => {
            let repo = PgTranscriptRepository::new(pool);
            run_with_repo(config, &repo).await
        }
        Err(e) => {
            println!(
                "{}",
                style(format!(
                    "Could not connect to Postgres ({e}); running without persistence."
                ))
                .yellow()
            );
            let repo = MemoryTranscriptRepository::new();
            run_with_repo(config, &repo).await
        }
    }
}

async fn run_with_repo<R: TranscriptRepository>(config: &AppConfig, repo: &R) -> Result<()> {
    let prior = repo
        .history(THREAD)
        .await
        .map_err(|e| anyhow::anyhow!("loading stored history: {e}"))?;
    if !prior.is_empty() {
        println!("Resuming conversation with {} stored turns.", prior.len());
    }

    let primary = ConversationChain::new(
        super::chat_model(config),
        &config.chat_model,
        config.max_output_tokens,
        SYSTEM_PROMPT,
    );
    let fallback = DirectChain::new(
        super::chat_model(config),
        &config.chat_model,
        config.max_output_tokens,
    );
    let mut engine =
        SessionEngine::with_transcript(primary, fallback, Transcript::from_turns(prior));

    println!("You can ask me anything. Type 'exit' to quit.");
    println!();
    crate::chat::runner::run_chat_loop(&mut engine, Some((repo, THREAD))).await?;

    let stored = repo.count(THREAD).await.unwrap_or(0);
    println!("Stored transcript turns: {stored}");
    Ok(())
}
