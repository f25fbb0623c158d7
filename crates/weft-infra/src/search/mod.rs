//! Tavily web search tool for the agent.
//!
//! Wraps the Tavily search API as a core `Tool`: the model's action input
//! is sent as the query, and the top results come back as one observation
//! string.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use weft_core::agent::Tool;
use weft_types::error::ToolError;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// How many results are folded into the observation.
const MAX_RESULTS: usize = 3;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: String,
    url: String,
    content: String,
}

/// A [`Tool`] that searches the web through the Tavily API.
pub struct TavilySearchTool {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl TavilySearchTool {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn search(&self, query: &str) -> Result<String, ToolError> {
        let fail = |message: String| ToolError::Failed {
            tool: "tavily_search".to_string(),
            message,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&SearchRequest {
                query,
                max_results: MAX_RESULTS,
            })
            .send()
            .await
            .map_err(|e| fail(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fail(format!("HTTP {status}: {body}")));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| fail(format!("failed to parse response: {e}")))?;

        debug!(query, results = parsed.results.len(), "tavily search completed");
        Ok(format_results(&parsed.results))
    }
}

fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "no search results found".to_string();
    }
    results
        .iter()
        .take(MAX_RESULTS)
        .map(|r| format!("{} ({})\n{}", r.title, r.url, r.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        "tavily_search"
    }

    fn description(&self) -> &str {
        "Searches the web for current information and events"
    }

    fn call<'a>(
        &'a self,
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(self.search(input))
    }
}
