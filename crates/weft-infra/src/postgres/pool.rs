//! Postgres connection pool for the transcript store.
//!
//! One small pool is enough: the session loop issues at most one query at
//! a time. Migrations run on connect so a fresh database is usable
//! immediately.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use weft_types::config::PgSettings;

/// Connect to Postgres using the given settings and run migrations.
pub async fn connect(settings: &PgSettings) -> Result<PgPool, sqlx::Error> {
    let mut opts = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .database(&settings.database);
    if !settings.password.is_empty() {
        opts = opts.password(&settings.password);
    }

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(opts)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    Ok(pool)
}
