//! Demo 4: interactive tool-using agent chat.
//!
//! The agent gets two tools -- Tavily web search and a retriever over an
//! indexed documentation page -- and answers through a bounded ReAct
//! loop. Exchanges run through the session engine, so exit sentinels,
//! empty input, and the one-shot direct fallback behave exactly as in
//! the memory demo.

use anyhow::Result;
use console::style;
use secrecy::SecretString;

use weft_core::agent::{AgentExecutor, RetrieverTool, Tool};
use weft_core::chain::DirectChain;
use weft_core::chat::SessionEngine;
use weft_core::history::MemoryTranscriptRepository;
use weft_infra::search::TavilySearchTool;
use weft_types::config::AppConfig;

use super::{chat_model, indexed_retriever};

/// Documentation page indexed for the retriever tool.
const DOCS_URL: &str = "https://doc.rust-lang.org/book/ch01-00-getting-started.html";

fn print_banner() {
    let rule = "━".repeat(51);
    println!("{}", style("Interactive Agent Chat").cyan().bold());
    println!("{rule}");
    println!("Hello! I'm an assistant with access to web search and an indexed docs page.");
    println!("Ask me about current events, or about getting started with Rust.");
    println!("Type 'exit' anytime to end our conversation.");
    println!("{rule}");
    println!();
}

pub async fn run(config: &AppConfig) -> Result<()> {
    println!("Indexing {DOCS_URL} for the retriever tool...");
    let retriever = indexed_retriever(config, DOCS_URL).await?;

    let tavily_key = config.tavily_api_key.clone().unwrap_or_default();
    let tools: Vec<Box<dyn Tool>> = vec![
        Box::new(TavilySearchTool::new(SecretString::from(tavily_key))),
        Box::new(RetrieverTool::new(
            retriever,
            "web_retriever",
            "Retrieves relevant passages from the indexed documentation page",
        )),
    ];

    let primary = AgentExecutor::new(
        chat_model(config),
        &config.chat_model,
        config.max_output_tokens,
        tools,
    );
    let fallback = DirectChain::new(
        chat_model(config),
        &config.chat_model,
        config.max_output_tokens,
    );
    let mut engine = SessionEngine::new(primary, fallback);

    print_banner();
    crate::chat::runner::run_chat_loop(
        &mut engine,
        None::<(&MemoryTranscriptRepository, &str)>,
    )
    .await
}
