//! Chain and agent runtime for Weft.
//!
//! This crate holds the logic layer: prompt templates, output parsers,
//! the chain adapters that translate turn history + input into model
//! requests, the ReAct agent executor, and the session engine driving the
//! interactive loop. It also defines the "ports" (provider, retriever,
//! and repository traits) that weft-infra implements. It depends only on
//! `weft-types` -- never on weft-infra or any HTTP/database crate.

pub mod agent;
pub mod chain;
pub mod chat;
pub mod history;
pub mod llm;
pub mod parser;
pub mod prompt;
pub mod retriever;

#[cfg(test)]
pub(crate) mod testkit;
