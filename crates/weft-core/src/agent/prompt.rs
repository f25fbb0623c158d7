//! ReAct agent prompt assembly.

use std::collections::HashMap;

use weft_types::chat::{render_turns, Turn};
use weft_types::error::PromptError;

use crate::prompt::PromptTemplate;

use super::Tool;

/// The ReAct prompt driving the agent loop.
///
/// The model is cut off at `Observation:` via a stop sequence, so the
/// instruction not to invent observations is backed up mechanically.
const REACT_TEMPLATE: &str = "\
Answer the following questions as best you can. You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Do not make up observations. After writing an Action and Action Input, stop \
and wait for the Observation. Always choose the most appropriate tool for the \
question.

Begin!

Question: {input}
Chat History: {chat_history}
Thought: {agent_scratchpad}";

/// Render the full agent prompt for one loop iteration.
pub fn render_react_prompt(
    tools: &[Box<dyn Tool>],
    history: &[Turn],
    input: &str,
    scratchpad: &str,
) -> Result<String, PromptError> {
    let tool_lines = tools
        .iter()
        .map(|t| format!("{}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");
    let tool_names = tools
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");

    let mut vars = HashMap::new();
    vars.insert("tools", tool_lines);
    vars.insert("tool_names", tool_names);
    vars.insert("input", input.to_string());
    vars.insert("chat_history", render_turns(history));
    vars.insert("agent_scratchpad", scratchpad.to_string());

    PromptTemplate::new(REACT_TEMPLATE).render(&vars)
}
