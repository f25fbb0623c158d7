//! Interactive chat loop orchestration.
//!
//! Reads lines, feeds them to the session engine, and renders each step
//! outcome. When a transcript repository is supplied, every committed
//! exchange (primary-path success only) is persisted as a user turn and
//! an assistant turn; fallback replies are displayed but never stored.

use anyhow::Result;
use console::style;

use weft_core::chain::ChainAdapter;
use weft_core::chat::{SessionEngine, StepOutcome, APOLOGY_MESSAGE};
use weft_core::history::TranscriptRepository;
use weft_types::chat::Turn;

use super::input::{ChatInput, InputEvent};

const SEPARATOR_WIDTH: usize = 60;

fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn print_farewell() {
    println!();
    println!("{}", style("Thank you for chatting! Have a great day!").dim());
}

/// Run the interactive loop until the user exits.
///
/// `persist` optionally names a transcript repository and thread to append
/// committed exchanges to.
pub async fn run_chat_loop<P, F, R>(
    engine: &mut SessionEngine<P, F>,
    persist: Option<(&R, &str)>,
) -> Result<()>
where
    P: ChainAdapter,
    F: ChainAdapter,
    R: TranscriptRepository,
{
    let prompt = format!("{} ", style("You >").green().bold());
    let (mut input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    while engine.is_active() {
        let line = match input.read_line().await {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                print_farewell();
                break;
            }
            InputEvent::Interrupted => {
                println!("{}", style("Type 'exit' to leave, or keep chatting.").dim());
                continue;
            }
        };

        let spinner = thinking_spinner();
        let outcome = engine.step(&line).await;
        spinner.finish_and_clear();

        match outcome {
            StepOutcome::Ended => {
                print_farewell();
                break;
            }
            StepOutcome::Reprompt => {
                println!(
                    "{}",
                    style("I didn't catch that. Please ask me something, or type 'exit' to end our chat.")
                        .dim()
                );
            }
            StepOutcome::Replied {
                answer,
                sources,
                via_fallback,
            } => {
                if via_fallback {
                    println!(
                        "{}",
                        style("(tools were unavailable; answered directly)").yellow().dim()
                    );
                }
                println!("{} {}", style("Assistant >").cyan().bold(), answer.trim());
                for source in &sources {
                    println!("  {} {}", style("source:").dim(), style(source).dim());
                }
                println!("{}", style("─".repeat(SEPARATOR_WIDTH)).dim());

                if !via_fallback {
                    if let Some((repo, thread)) = persist {
                        let committed = engine.transcript().turns();
                        // The engine just pushed the user and assistant turns.
                        for turn in committed.iter().rev().take(2).rev() {
                            persist_turn(repo, thread, turn).await;
                        }
                    }
                }
            }
            StepOutcome::Apology => {
                println!("{} {}", style("Assistant >").cyan().bold(), APOLOGY_MESSAGE);
                println!("{}", style("─".repeat(SEPARATOR_WIDTH)).dim());
            }
        }
    }

    Ok(())
}

async fn persist_turn<R: TranscriptRepository>(repo: &R, thread: &str, turn: &Turn) {
    if let Err(e) = repo.append(thread, turn).await {
        tracing::warn!(%e, "failed to persist turn; continuing without it");
    }
}
