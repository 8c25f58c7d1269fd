//! Saved-output database: split reader/writer connections in WAL mode.
//!
//! Writes are serialized on a single connection; listing and lookup run on a
//! small read-only pool sized from [`DatabaseConfig`].

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use postcraft_types::config::DatabaseConfig;

#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open (creating if needed) the database at `database_url` and apply
    /// pending migrations.
    ///
    /// Both pools use WAL with `synchronous = NORMAL`. A zero `max_readers`
    /// is raised to one.
    pub async fn new(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(base_opts.clone())
            .await?;

        // Readers open read-only, so the schema must exist first.
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let max_readers = config.max_readers.max(1);
        let reader = SqlitePoolOptions::new()
            .max_connections(max_readers)
            .connect_with(base_opts.read_only(true))
            .await?;

        tracing::debug!(url = database_url, max_readers, "saved-output database ready");
        Ok(Self { reader, writer })
    }
}
