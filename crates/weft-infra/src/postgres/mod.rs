//! Postgres-backed transcript persistence.

pub mod pool;
pub mod transcript;

pub use pool::connect;
pub use transcript::PgTranscriptRepository;
