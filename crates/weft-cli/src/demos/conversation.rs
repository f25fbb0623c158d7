//! Demo 3: history-aware retrieval QA.
//!
//! Same pipeline as the retrieval demo, but with a seeded conversation:
//! the question leans on the history ("his"), so the chain first rewrites
//! it into a standalone search query before retrieving.

use anyhow::Result;
use console::style;

use weft_core::chain::{ChainAdapter, ConversationRetrievalChain};
use weft_types::chat::Turn;
use weft_types::config::AppConfig;

use super::{chat_model, indexed_retriever, PROFILE_URL};

const QUESTION: &str =
    "What is Vishwas Gopinath's current role and what are his main technical skills?";

/// Seeded history the follow-up question refers back to.
fn seeded_history() -> Vec<Turn> {
    vec![
        Turn::user("What are Vishwas Gopinath's hobbies?"),
        Turn::assistant("He enjoys coding, teaching through YouTube, and building developer tools."),
        Turn::user("What programming languages does he specialize in?"),
        Turn::assistant(
            "He specializes in JavaScript, React, React Native, and TypeScript, with experience \
             in Vue, Angular, Node.js, and MongoDB.",
        ),
        Turn::user("What is his educational background?"),
        Turn::assistant(
            "He has a Bachelor of Engineering in Computer Science from Visvesvaraya \
             Technological University.",
        ),
    ]
}

pub async fn run(config: &AppConfig) -> Result<()> {
    println!("Setting up history-aware retriever...");
    let retriever = indexed_retriever(config, PROFILE_URL).await?;
    let chain = ConversationRetrievalChain::new(
        chat_model(config),
        retriever,
        &config.chat_model,
        config.max_output_tokens,
    );

    let history = seeded_history();
    println!("Seeded {} prior turns", history.len());
    println!("\n{} {QUESTION}", style("Question:").bold());

    let reply = chain.invoke(&history, QUESTION).await?;

    println!("\n{} {}", style("Answer:").bold(), reply.answer.trim());
    println!("\n{}", style("Context documents used:").bold());
    for (i, source) in reply.sources.iter().enumerate() {
        println!("  {}. {source}", i + 1);
    }

    Ok(())
}
