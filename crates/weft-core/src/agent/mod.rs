//! Tool-using agent runtime.
//!
//! The agent is a chain variant that iteratively selects and invokes tools
//! based on model output before producing a final answer. The executor
//! drives a ReAct-format loop; tools are object-safe trait objects so the
//! executor can hold a heterogeneous set.

pub mod executor;
pub mod parser;
pub mod prompt;

use std::future::Future;
use std::pin::Pin;

use weft_types::error::ToolError;

use crate::retriever::Retriever;

pub use executor::AgentExecutor;
pub use parser::{parse_react, AgentStep};

/// An external capability the agent can invoke by name.
///
/// `call` returns a boxed future (not RPITIT) because tools need to be
/// object-safe for the executor's `Vec<Box<dyn Tool>>`.
pub trait Tool: Send + Sync {
    /// Identifier the model uses to select this tool.
    fn name(&self) -> &str;

    /// One-line description shown to the model in the agent prompt.
    fn description(&self) -> &str;

    /// Invoke the tool, producing an observation string for the model.
    fn call<'a>(
        &'a self,
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;
}

/// Number of chunks the retriever tool feeds back to the model.
const RETRIEVER_TOOL_TOP_K: usize = 2;

/// A [`Tool`] that exposes a [`Retriever`] to the agent.
pub struct RetrieverTool<R: Retriever> {
    retriever: R,
    name: String,
    description: String,
}

impl<R: Retriever> RetrieverTool<R> {
    pub fn new(retriever: R, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            retriever,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl<R: Retriever> Tool for RetrieverTool<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn call<'a>(
        &'a self,
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let hits = self
                .retriever
                .retrieve(input, RETRIEVER_TOOL_TOP_K)
                .await
                .map_err(|e| ToolError::Failed {
                    tool: self.name.clone(),
                    message: e.to_string(),
                })?;

            if hits.is_empty() {
                return Ok("no relevant documents found".to_string());
            }
            Ok(hits
                .iter()
                .map(|s| s.chunk.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"))
        })
    }
}
