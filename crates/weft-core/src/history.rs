//! TranscriptRepository trait definition.
//!
//! Persistence port for conversation history, keyed by a thread name so
//! multiple conversations can share one table. The Postgres implementation
//! lives in weft-infra; [`MemoryTranscriptRepository`] backs tests and
//! offline runs. Uses native async fn in traits (RPITIT, Rust 2024
//! edition).

use std::collections::HashMap;
use std::sync::Mutex;

use weft_types::chat::Turn;
use weft_types::error::RepositoryError;

/// Repository trait for persisted conversation history.
pub trait TranscriptRepository: Send + Sync {
    /// Append one turn to the named thread.
    fn append(
        &self,
        thread: &str,
        turn: &Turn,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All turns in the named thread, oldest first.
    fn history(
        &self,
        thread: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// Number of turns in the named thread.
    fn count(
        &self,
        thread: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete all turns in the named thread.
    fn clear(
        &self,
        thread: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// In-memory implementation of [`TranscriptRepository`].
///
/// Backs unit tests and lets the memory demo run without a database.
#[derive(Debug, Default)]
pub struct MemoryTranscriptRepository {
    threads: Mutex<HashMap<String, Vec<Turn>>>,
}

impl MemoryTranscriptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptRepository for MemoryTranscriptRepository {
    async fn append(&self, thread: &str, turn: &Turn) -> Result<(), RepositoryError> {
        let mut threads = self.threads.lock().expect("transcript lock poisoned");
        threads
            .entry(thread.to_string())
            .or_default()
            .push(turn.clone());
        Ok(())
    }

    async fn history(&self, thread: &str) -> Result<Vec<Turn>, RepositoryError> {
        let threads = self.threads.lock().expect("transcript lock poisoned");
        Ok(threads.get(thread).cloned().unwrap_or_default())
    }

    async fn count(&self, thread: &str) -> Result<u64, RepositoryError> {
        let threads = self.threads.lock().expect("transcript lock poisoned");
        Ok(threads.get(thread).map(|t| t.len() as u64).unwrap_or(0))
    }

    async fn clear(&self, thread: &str) -> Result<(), RepositoryError> {
        let mut threads = self.threads.lock().expect("transcript lock poisoned");
        threads.remove(thread);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_preserves_order() {
        let repo = MemoryTranscriptRepository::new();
        repo.append("t", &Turn::user("one")).await.unwrap();
        repo.append("t", &Turn::assistant("two")).await.unwrap();
        repo.append("t", &Turn::user("three")).await.unwrap();

        let history = repo.history("t").await.unwrap();
        let texts: Vec<&str> = history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(repo.count("t").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_threads_are_isolated() {
        let repo = MemoryTranscriptRepository::new();
        repo.append("a", &Turn::user("in a")).await.unwrap();
        repo.append("b", &Turn::user("in b")).await.unwrap();

        assert_eq!(repo.count("a").await.unwrap(), 1);
        assert_eq!(repo.count("b").await.unwrap(), 1);
        assert_eq!(repo.history("a").await.unwrap()[0].text, "in a");
    }

    #[tokio::test]
    async fn test_clear_removes_thread() {
        let repo = MemoryTranscriptRepository::new();
        repo.append("t", &Turn::user("gone soon")).await.unwrap();
        repo.clear("t").await.unwrap();

        assert_eq!(repo.count("t").await.unwrap(), 0);
        assert!(repo.history("t").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_thread_is_empty() {
        let repo = MemoryTranscriptRepository::new();
        assert!(repo.history("missing").await.unwrap().is_empty());
        assert_eq!(repo.count("missing").await.unwrap(), 0);
    }
}
