//! Postgres transcript repository implementation.
//!
//! Implements `TranscriptRepository` from `weft-core` using sqlx with raw
//! queries and a private Row struct for the Postgres-to-domain mapping.

use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use weft_core::history::TranscriptRepository;
use weft_types::chat::{Speaker, StoredTurn, Turn};
use weft_types::error::RepositoryError;

/// Postgres-backed implementation of `TranscriptRepository`.
pub struct PgTranscriptRepository {
    pool: PgPool,
}

impl PgTranscriptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping Postgres rows to domain turns.
struct TranscriptRow {
    speaker: String,
    text: String,
}

impl TranscriptRow {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            speaker: row.try_get("speaker")?,
            text: row.try_get("text")?,
        })
    }

    fn into_turn(self) -> Result<Turn, RepositoryError> {
        let speaker: Speaker = self
            .speaker
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        Ok(Turn {
            speaker,
            text: self.text,
        })
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

impl TranscriptRepository for PgTranscriptRepository {
    async fn append(&self, thread: &str, turn: &Turn) -> Result<(), RepositoryError> {
        let stored = StoredTurn::new(thread, turn);
        sqlx::query(
            "INSERT INTO transcripts (id, thread, speaker, text, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(stored.id)
        .bind(&stored.thread)
        .bind(stored.speaker.to_string())
        .bind(&stored.text)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    async fn history(&self, thread: &str) -> Result<Vec<Turn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT speaker, text FROM transcripts \
             WHERE thread = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(thread)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| TranscriptRow::from_row(row).map_err(query_error)?.into_turn())
            .collect()
    }

    async fn count(&self, thread: &str) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transcripts WHERE thread = $1")
            .bind(thread)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(count as u64)
    }

    async fn clear(&self, thread: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM transcripts WHERE thread = $1")
            .bind(thread)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(())
    }
}
