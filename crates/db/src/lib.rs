use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::info;

pub mod models;

/// Shared handle to the project store.
#[derive(Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    /// Connect to `database_url`, creating the file if needed, and apply
    /// pending migrations.
    ///
    /// In-memory URLs get a single connection so every query sees the same
    /// database.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let in_memory = database_url.contains(":memory:");
        let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 8 });
        if in_memory {
            // dropping the only connection drops the database
            pool_options = pool_options.idle_timeout(None::<Duration>).max_lifetime(None::<Duration>);
        }
        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(in_memory, "Project store ready");

        Ok(Self { pool })
    }
}
