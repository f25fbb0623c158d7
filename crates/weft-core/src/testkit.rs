//! Shared test doubles for the chain/agent/session tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use weft_types::chat::Turn;
use weft_types::document::{DocumentChunk, ScoredChunk};
use weft_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};

use crate::agent::Tool;
use crate::chain::{ChainAdapter, ChainError, ChainReply};
use crate::llm::ChatModel;
use crate::retriever::{RetrievalError, Retriever};
use weft_types::error::ToolError;

/// One scripted step for [`StubModel`].
#[derive(Debug, Clone)]
pub enum StubStep {
    Reply(String),
    Fail,
}

/// A scriptable [`ChatModel`] that records every request it receives.
pub struct StubModel {
    script: Mutex<VecDeque<StubStep>>,
    default_reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    /// Always reply with the same text.
    pub fn replying(text: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Play the given steps in order; fail once the script runs out.
    pub fn scripted(steps: Vec<StubStep>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
            default_reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail.
    pub fn failing() -> Self {
        Self::scripted(vec![StubStep::Fail])
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatModel for StubModel {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());

        let step = self.script.lock().unwrap().pop_front();
        let text = match step {
            Some(StubStep::Reply(text)) => text,
            Some(StubStep::Fail) => {
                return Err(LlmError::Provider {
                    message: "stub failure".to_string(),
                });
            }
            None => match &self.default_reply {
                Some(text) => text.clone(),
                None => {
                    return Err(LlmError::Provider {
                        message: "stub script exhausted".to_string(),
                    });
                }
            },
        };

        Ok(CompletionResponse {
            id: "stub-response".to_string(),
            content: text,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

/// A [`Retriever`] that returns a fixed set of chunks for every query.
pub struct StubRetriever {
    chunks: Vec<ScoredChunk>,
    pub queries: Mutex<Vec<String>>,
}

impl StubRetriever {
    pub fn with_contents(contents: &[&str]) -> Self {
        let chunks = contents
            .iter()
            .enumerate()
            .map(|(index, content)| ScoredChunk {
                chunk: DocumentChunk {
                    content: content.to_string(),
                    source: None,
                    index,
                },
                score: 1.0 - index as f32 * 0.1,
            })
            .collect();
        Self {
            chunks,
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl Retriever for StubRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, RetrievalError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.chunks.iter().take(k).cloned().collect())
    }
}

/// A [`ChainAdapter`] that plays back scripted replies/failures.
pub struct StubChain {
    script: Mutex<VecDeque<Result<ChainReply, ()>>>,
    pub inputs: Mutex<Vec<String>>,
}

impl StubChain {
    pub fn scripted(steps: Vec<Result<ChainReply, ()>>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::scripted(vec![Ok(ChainReply::plain(text))])
    }

    pub fn failing() -> Self {
        Self::scripted(vec![Err(())])
    }
}

impl ChainAdapter for StubChain {
    async fn invoke(&self, _history: &[Turn], input: &str) -> Result<ChainReply, ChainError> {
        self.inputs.lock().unwrap().push(input.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(())) | None => Err(ChainError::Llm(LlmError::Provider {
                message: "stub chain failure".to_string(),
            })),
        }
    }
}

/// A [`Tool`] with a fixed observation that records its invocations.
pub struct StubTool {
    name: String,
    description: String,
    output: String,
    pub calls: Mutex<Vec<String>>,
}

impl StubTool {
    pub fn new(name: &str, description: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            output: output.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Tool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn call<'a>(
        &'a self,
        input: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, ToolError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.calls.lock().unwrap().push(input.to_string());
            Ok(self.output.clone())
        })
    }
}
