//! Weft CLI entry point.
//!
//! Binary name: `weft`
//!
//! Parses CLI arguments, loads configuration from the environment,
//! initializes tracing, then either runs the requested demo directly or
//! shows the interactive menu. Demo failures are printed, not fatal: the
//! process exits cleanly either way.

mod chat;
mod cli;
mod demos;
mod menu;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, Demo};
use weft_types::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Shell completions don't need config or tracing
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "weft", &mut std::io::stdout());
        return Ok(());
    }

    let config = weft_infra::config::load();
    if let Err(e) =
        weft_observe::tracing_setup::init_tracing(config.otel_enabled, cli.log_filter())
    {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let selected = match cli.command {
        Some(Commands::Run { demo }) => Some(demo),
        _ => match menu::prompt_selection() {
            menu::MenuChoice::Exit => {
                println!("Goodbye!");
                None
            }
            menu::MenuChoice::Demo(demo) => Some(demo),
        },
    };

    if let Some(demo) = selected {
        println!("\nRunning {}...\n", demo.title());
        if let Err(e) = run_demo(demo, &config).await {
            eprintln!("Error running demo: {e:#}");
        }
    }

    weft_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

async fn run_demo(demo: Demo, config: &AppConfig) -> anyhow::Result<()> {
    match demo {
        Demo::Parser => demos::parser::run(config).await,
        Demo::Retrieval => demos::retrieval::run(config).await,
        Demo::Conversation => demos::conversation::run(config).await,
        Demo::Agent => demos::agent::run(config).await,
        Demo::Memory => demos::memory::run(config).await,
    }
}
