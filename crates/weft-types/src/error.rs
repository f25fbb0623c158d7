//! Error types shared across the workspace.
//!
//! LLM provider errors live in [`crate::llm::LlmError`]; this module holds
//! the remaining error taxonomies: repositories, document loading, prompt
//! rendering, output parsing, and agent tools.

use thiserror::Error;

/// Errors from repository operations (used by trait definitions in weft-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the web document loader.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid CSS selector '{0}'")]
    InvalidSelector(String),

    #[error("no elements matched selector '{selector}' at {url}")]
    NoMatches { selector: String, url: String },
}

/// Errors from prompt template rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing template variable '{0}'")]
    MissingVariable(String),

    #[error("unclosed placeholder in template")]
    UnclosedPlaceholder,
}

/// Errors from output parsers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not parse model output: {0}")]
    Malformed(String),
}

/// Errors from agent tool invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{tool}' failed: {message}")]
    Failed { tool: String, message: String },

    #[error("unknown tool '{0}'")]
    Unknown(String),
}
