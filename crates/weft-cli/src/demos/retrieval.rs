//! Demo 2: retrieval QA over a scraped web page.
//!
//! Scrapes the profile page, indexes it, answers a fixed question, and
//! shows the retrieved source excerpts.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use console::style;

use weft_core::chain::{ChainAdapter, RetrievalChain};
use weft_types::config::AppConfig;

use super::{chat_model, indexed_retriever, PROFILE_URL};

const QUESTION: &str = "Who is Vishwas Gopinath?";

pub async fn run(config: &AppConfig) -> Result<()> {
    let retriever = indexed_retriever(config, PROFILE_URL).await?;
    let chain = RetrievalChain::new(
        chat_model(config),
        retriever,
        &config.chat_model,
        config.max_output_tokens,
    );

    println!("\n{} {QUESTION}", style("Question:").bold());
    let reply = chain.invoke(&[], QUESTION).await?;

    println!("\n{} {}", style("Answer:").bold(), reply.answer.trim());

    if !reply.sources.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Source excerpt"]);
        for (i, source) in reply.sources.iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), source.clone()]);
        }
        println!("\n{table}");
    }

    Ok(())
}
