//! CLI argument definitions for the `weft` binary.
//!
//! With no subcommand, `weft` shows the interactive demo menu. Each demo
//! is also reachable directly via `weft run <demo>`.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Interactive LLM chain playground.
#[derive(Parser)]
#[command(name = "weft", version, about, long_about = None)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one demo directly, skipping the menu.
    Run {
        /// Which demo to run.
        #[arg(value_enum)]
        demo: Demo,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// The available demos, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// One-shot prompt with output parsing.
    Parser,
    /// Retrieval QA over a scraped web page.
    Retrieval,
    /// History-aware retrieval QA.
    Conversation,
    /// Interactive tool-using agent chat.
    Agent,
    /// Interactive chat with Postgres-backed memory.
    Memory,
}

impl Demo {
    /// Human-readable demo name for status output.
    pub fn title(&self) -> &'static str {
        match self {
            Demo::Parser => "the Prompt & Output Parser demo",
            Demo::Retrieval => "the Retrieval Chain demo",
            Demo::Conversation => "the Conversation Retrieval Chain demo",
            Demo::Agent => "the Agent Chat demo",
            Demo::Memory => "the Memory Chat demo",
        }
    }
}

impl Cli {
    /// Default tracing filter derived from the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,weft=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter_levels() {
        let quiet = Cli::parse_from(["weft", "--quiet"]);
        assert_eq!(quiet.log_filter(), "error");

        let normal = Cli::parse_from(["weft"]);
        assert_eq!(normal.log_filter(), "warn");

        let verbose = Cli::parse_from(["weft", "-v"]);
        assert_eq!(verbose.log_filter(), "info,weft=debug");

        let debug = Cli::parse_from(["weft", "-vv"]);
        assert_eq!(debug.log_filter(), "trace");
    }

    #[test]
    fn test_run_subcommand_parses_demo() {
        let cli = Cli::parse_from(["weft", "run", "agent"]);
        match cli.command {
            Some(Commands::Run { demo }) => assert_eq!(demo, Demo::Agent),
            _ => panic!("expected run subcommand"),
        }
    }
}
