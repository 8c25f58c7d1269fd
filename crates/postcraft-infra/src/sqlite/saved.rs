//! SQLite saved output repository implementation.
//!
//! Implements `SavedOutputRepository` from `postcraft-core` using sqlx with
//! split read/write pools. Sources and platforms are stored as JSON text.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use postcraft_core::repository::SavedOutputRepository;
use postcraft_types::error::RepositoryError;
use postcraft_types::output::{GroundingSource, SavedOutput};
use postcraft_types::platform::Platform;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SavedOutputRepository`.
pub struct SqliteSavedOutputRepository {
    pool: DatabasePool,
}

impl SqliteSavedOutputRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain SavedOutput.
struct SavedOutputRow {
    id: String,
    content: String,
    sources: String,
    platforms: String,
    created_at: String,
    saved_at: String,
}

impl SavedOutputRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            sources: row.try_get("sources")?,
            platforms: row.try_get("platforms")?,
            created_at: row.try_get("created_at")?,
            saved_at: row.try_get("saved_at")?,
        })
    }

    fn into_saved(self) -> Result<SavedOutput, RepositoryError> {
        let id = self
            .id
            .parse::<Uuid>()
            .map_err(|e| RepositoryError::Query(format!("invalid saved output id: {e}")))?;

        let sources: Vec<GroundingSource> = serde_json::from_str(&self.sources)
            .map_err(|e| RepositoryError::Query(format!("invalid sources JSON: {e}")))?;

        let platforms: Vec<Platform> = serde_json::from_str(&self.platforms)
            .map_err(|e| RepositoryError::Query(format!("invalid platforms JSON: {e}")))?;

        Ok(SavedOutput {
            id,
            content: self.content,
            sources,
            platforms,
            created_at: parse_datetime(&self.created_at)?,
            saved_at: parse_datetime(&self.saved_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

impl SavedOutputRepository for SqliteSavedOutputRepository {
    async fn save(&self, output: &SavedOutput) -> Result<(), RepositoryError> {
        let sources = serde_json::to_string(&output.sources)
            .map_err(|e| RepositoryError::Query(format!("failed to encode sources: {e}")))?;
        let platforms = serde_json::to_string(&output.platforms)
            .map_err(|e| RepositoryError::Query(format!("failed to encode platforms: {e}")))?;

        sqlx::query(
            "INSERT INTO saved_outputs (id, content, sources, platforms, created_at, saved_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(output.id.to_string())
        .bind(&output.content)
        .bind(sources)
        .bind(platforms)
        .bind(format_datetime(&output.created_at))
        .bind(format_datetime(&output.saved_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!(
                        "saved output {} already exists",
                        output.id
                    ));
                }
            }
            RepositoryError::Query(e.to_string())
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<SavedOutput>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, content, sources, platforms, created_at, saved_at
             FROM saved_outputs ORDER BY saved_at DESC, id DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                SavedOutputRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_saved()
            })
            .collect()
    }

    async fn get(&self, id: &Uuid) -> Result<Option<SavedOutput>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, content, sources, platforms, created_at, saved_at
             FROM saved_outputs WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|r| {
            SavedOutputRow::from_row(&r)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_saved()
        })
        .transpose()
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM saved_outputs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM saved_outputs")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(row.0.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use postcraft_types::config::DatabaseConfig;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url, &DatabaseConfig::default())
            .await
            .unwrap()
    }

    fn make_saved(content: &str, saved_at: DateTime<Utc>) -> SavedOutput {
        SavedOutput {
            id: Uuid::now_v7(),
            content: content.to_string(),
            sources: vec![GroundingSource {
                uri: "https://example.com/trends".to_string(),
                title: "Trends".to_string(),
            }],
            created_at: saved_at - Duration::seconds(5),
            saved_at,
            platforms: vec![Platform::Instagram, Platform::X],
        }
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = SqliteSavedOutputRepository::new(test_pool().await);
        let saved = make_saved("## Instagram\n### Variation 1\nHi", Utc::now());

        repo.save(&saved).await.unwrap();
        let fetched = repo.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = SqliteSavedOutputRepository::new(test_pool().await);
        assert!(repo.get(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_save_is_conflict() {
        let repo = SqliteSavedOutputRepository::new(test_pool().await);
        let saved = make_saved("content", Utc::now());
        repo.save(&saved).await.unwrap();

        let err = repo.save(&saved).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = SqliteSavedOutputRepository::new(test_pool().await);
        let now = Utc::now();
        let oldest = make_saved("oldest", now - Duration::hours(2));
        let newest = make_saved("newest", now);
        let middle = make_saved("middle", now - Duration::hours(1));

        for s in [&oldest, &newest, &middle] {
            repo.save(s).await.unwrap();
        }

        let contents: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.content)
            .collect();
        assert_eq!(contents, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = SqliteSavedOutputRepository::new(test_pool().await);
        let saved = make_saved("bye", Utc::now());
        repo.save(&saved).await.unwrap();

        repo.delete(&saved.id).await.unwrap();
        assert!(repo.get(&saved.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&saved.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
