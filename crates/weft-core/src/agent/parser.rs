//! ReAct transcript parser.
//!
//! Extracts the next step from a model reply written in the ReAct format:
//! either an `Action:` / `Action Input:` pair or a `Final Answer:`. A
//! final answer takes precedence when both appear, since the model has
//! declared itself done.

use weft_types::error::ParseError;

const FINAL_ANSWER_MARKER: &str = "Final Answer:";
const ACTION_MARKER: &str = "Action:";
const ACTION_INPUT_MARKER: &str = "Action Input:";

/// The next step the agent should take, as parsed from model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    /// The model produced its final answer.
    FinalAnswer(String),
    /// The model wants a tool invoked with the given input.
    Action { tool: String, input: String },
}

/// Parse one model reply in ReAct format.
pub fn parse_react(text: &str) -> Result<AgentStep, ParseError> {
    if let Some(pos) = text.find(FINAL_ANSWER_MARKER) {
        let answer = text[pos + FINAL_ANSWER_MARKER.len()..].trim();
        return Ok(AgentStep::FinalAnswer(answer.to_string()));
    }

    let mut tool = None;
    let mut input = None;
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(ACTION_INPUT_MARKER) {
            input = Some(strip_quotes(rest.trim()).to_string());
        } else if let Some(rest) = line.strip_prefix(ACTION_MARKER) {
            tool = Some(rest.trim().to_string());
        }
    }

    match (tool, input) {
        (Some(tool), Some(input)) if !tool.is_empty() => Ok(AgentStep::Action { tool, input }),
        _ => Err(ParseError::Malformed(format!(
            "expected '{ACTION_MARKER}' with '{ACTION_INPUT_MARKER}', or '{FINAL_ANSWER_MARKER}'"
        ))),
    }
}

/// Remove one pair of surrounding quotes, if present.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
