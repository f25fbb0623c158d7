//! Demo 1: one-shot prompt with output parsing.
//!
//! Asks the model for company names as a comma-separated list and runs
//! the reply through `CommaSeparatedListParser`; if the model ignored the
//! format, the raw reply is shown instead.

use anyhow::Result;
use console::style;

use weft_core::chain::{ChainAdapter, DirectChain};
use weft_core::parser::{CommaSeparatedListParser, OutputParser, StrOutputParser};
use weft_types::config::AppConfig;

use super::chat_model;

const PROMPT: &str = "What would be a good company name for a company that makes colorful \
     socks? Suggest five names as a comma-separated list, with no other text.";

pub async fn run(config: &AppConfig) -> Result<()> {
    let chain = DirectChain::new(
        chat_model(config),
        &config.chat_model,
        config.max_output_tokens,
    );

    println!("{} {PROMPT}", style("Prompt:").bold());
    let reply = chain.invoke(&[], PROMPT).await?;

    match CommaSeparatedListParser.parse(&reply.answer) {
        Ok(names) => {
            println!("\n{}", style("Parsed suggestions:").bold());
            for (i, name) in names.iter().enumerate() {
                println!("  {}. {name}", i + 1);
            }
        }
        Err(e) => {
            // Model ignored the list format; show the raw reply.
            tracing::debug!(%e, "list parse failed, falling back to raw output");
            let raw = StrOutputParser.parse(&reply.answer)?;
            println!("\n{} {raw}", style("Response:").bold());
        }
    }

    Ok(())
}
