//! Web page document loader.
//!
//! Fetches a page over HTTP and extracts the text of all nodes matching a
//! CSS selector (typically `p`), one line per matched node. The scraped
//! text becomes a single [`Document`] carrying the URL as its source.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::info;

use weft_types::document::Document;
use weft_types::error::LoaderError;

/// Default CSS selector for page text extraction.
pub const DEFAULT_SELECTOR: &str = "p";

/// Loads documents from web pages.
pub struct WebLoader {
    client: reqwest::Client,
}

impl WebLoader {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("weft/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to create reqwest client");
        Self { client }
    }

    /// Fetch `url` and extract the text of nodes matching `selector`.
    pub async fn load(&self, url: &str, selector: &str) -> Result<Document, LoaderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoaderError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| LoaderError::Fetch(e.to_string()))?;

        let text = extract_text(&html, selector, url)?;
        info!(url, selector, chars = text.len(), "loaded web document");
        Ok(Document::new(text, Some(url.to_string())))
    }
}

impl Default for WebLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the text of all nodes matching `selector` from an HTML string.
///
/// Kept separate from the HTTP fetch so extraction is testable against
/// fixture HTML, and so the non-`Send` scraper types never live across an
/// await point.
fn extract_text(html: &str, selector: &str, url: &str) -> Result<String, LoaderError> {
    let parsed_selector = Selector::parse(selector)
        .map_err(|_| LoaderError::InvalidSelector(selector.to_string()))?;
    let document = Html::parse_document(html);

    let lines: Vec<String> = document
        .select(&parsed_selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoaderError::NoMatches {
            selector: selector.to_string(),
            url: url.to_string(),
        });
    }

    Ok(lines.join("\n"))
}
