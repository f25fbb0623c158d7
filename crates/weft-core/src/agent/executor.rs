//! Agent execution loop.
//!
//! Drives the ReAct cycle: render prompt, complete with a stop sequence at
//! `Observation:`, parse the step, dispatch the tool, feed the observation
//! back, and repeat up to the iteration budget. Unknown tool names and
//! malformed replies are fed back to the model as observations rather than
//! failing the exchange; tool execution failures propagate so the session
//! loop can run its fallback.

use tracing::{debug, info, warn};

use weft_types::chat::Turn;
use weft_types::llm::CompletionRequest;

use crate::chain::{ChainAdapter, ChainError, ChainReply};
use crate::llm::ChatModel;

use super::parser::{parse_react, AgentStep};
use super::prompt::render_react_prompt;
use super::Tool;

/// Iteration budget for the ReAct loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Stop sequence that keeps the model from inventing observations.
const OBSERVATION_STOP: &str = "Observation:";

/// Drives a tool-using ReAct loop over a chat model.
pub struct AgentExecutor<M: ChatModel> {
    model: M,
    model_id: String,
    max_tokens: u32,
    tools: Vec<Box<dyn Tool>>,
    max_iterations: usize,
}

impl<M: ChatModel> AgentExecutor<M> {
    pub fn new(
        model: M,
        model_id: impl Into<String>,
        max_tokens: u32,
        tools: Vec<Box<dyn Tool>>,
    ) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            max_tokens,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn tool_names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Execute one tool selection, returning the observation text.
    async fn observe(&self, tool_name: &str, tool_input: &str) -> Result<String, ChainError> {
        let Some(tool) = self
            .tools
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(tool_name))
        else {
            warn!(%tool_name, "model selected an unknown tool");
            return Ok(format!(
                "unknown tool '{}'; available tools: {}",
                tool_name,
                self.tool_names()
            ));
        };

        debug!(tool = tool.name(), input = %tool_input, "invoking tool");
        let observation = tool.call(tool_input).await?;
        Ok(observation)
    }
}

impl<M: ChatModel> ChainAdapter for AgentExecutor<M> {
    async fn invoke(&self, history: &[Turn], input: &str) -> Result<ChainReply, ChainError> {
        let mut scratchpad = String::new();
        let mut last_text = String::new();

        for iteration in 0..self.max_iterations {
            let prompt = render_react_prompt(&self.tools, history, input, &scratchpad)?;
            let request = CompletionRequest {
                model: self.model_id.clone(),
                messages: vec![weft_types::llm::Message::user(prompt)],
                system: None,
                max_tokens: self.max_tokens,
                temperature: None,
                stop_sequences: Some(vec![OBSERVATION_STOP.to_string()]),
            };

            let response = self.model.complete(&request).await?;
            let text = response.content;
            last_text = text.clone();

            match parse_react(&text) {
                Ok(AgentStep::FinalAnswer(answer)) => {
                    info!(iteration, "agent reached a final answer");
                    return Ok(ChainReply::plain(answer));
                }
                Ok(AgentStep::Action { tool, input: tool_input }) => {
                    let observation = self.observe(&tool, &tool_input).await?;
                    scratchpad.push_str(&text);
                    scratchpad.push_str("\nObservation: ");
                    scratchpad.push_str(&observation);
                    scratchpad.push('\n');
                }
                Err(err) => {
                    debug!(%err, "feeding parse failure back to the model");
                    scratchpad.push_str(&text);
                    scratchpad.push_str(
                        "\nObservation: that reply was not in the expected format; \
                         reply with an Action and Action Input, or a Final Answer\n",
                    );
                }
            }
        }

        // Iteration budget spent without a declared final answer; hand back
        // the last model text as a best effort rather than failing the turn.
        warn!(max_iterations = self.max_iterations, "agent hit iteration budget");
        Ok(ChainReply::plain(last_text.trim().to_string()))
    }
}
