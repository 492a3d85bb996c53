use async_trait::async_trait;
use sqlx::PgPool;

use pictor_index::error::IndexError;
use pictor_index::record::{ImageRecord, NewImage};
use pictor_index::store::ImageIndex;

use crate::config::PostgresIndexConfig;
use crate::migrations;

/// Postgres-backed metadata index using `sqlx`.
pub struct PostgresImageIndex {
    pool: PgPool,
    table: String,
}

impl PostgresImageIndex {
    /// Create a new index, connecting to Postgres and running migrations.
    pub async fn new(config: &PostgresIndexConfig) -> Result<Self, IndexError> {
        let pool = PgPool::connect(&config.url)
            .await
            .map_err(|e| IndexError::Unavailable(e.to_string()))?;

        migrations::run_migrations(&pool, &config.prefix)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        tracing::debug!(prefix = %config.prefix, "postgres index migrations complete");

        Ok(Self {
            pool,
            table: format!("{}images", config.prefix),
        })
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: PgPool, prefix: &str) -> Result<Self, IndexError> {
        migrations::run_migrations(&pool, prefix)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            table: format!("{prefix}images"),
        })
    }
}

/// Map an `sqlx` error onto the index taxonomy: connection-class failures are
/// `Unavailable`, everything else is `Storage`.
fn map_sqlx_error(e: sqlx::Error) -> IndexError {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            IndexError::Unavailable(e.to_string())
        }
        other => IndexError::Storage(other.to_string()),
    }
}

#[async_trait]
impl ImageIndex for PostgresImageIndex {
    async fn insert(&self, image: NewImage) -> Result<ImageRecord, IndexError> {
        let record = image.into_record();

        let sql = format!(
            "
            INSERT INTO {} (
                id, stored_name, original_name, storage_path,
                size_bytes, content_type, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
            self.table
        );

        #[allow(clippy::cast_possible_wrap)]
        let size_bytes = record.size_bytes as i64;

        sqlx::query(&sql)
            .bind(&record.id)
            .bind(&record.stored_name)
            .bind(&record.original_name)
            .bind(&record.storage_path)
            .bind(size_bytes)
            .bind(&record.content_type)
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ImageRecord>, IndexError> {
        // UUID v7 ids are time-ordered, so the id tiebreak follows insertion
        // order for records sharing a timestamp.
        let sql = format!(
            "SELECT * FROM {} ORDER BY created_at DESC, id DESC",
            self.table
        );

        let rows: Vec<ImageRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), IndexError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| IndexError::Unavailable(e.to_string()))
    }
}

/// Internal row type for mapping database rows to `ImageRecord`.
#[derive(sqlx::FromRow)]
struct ImageRow {
    id: String,
    stored_name: String,
    original_name: String,
    storage_path: String,
    size_bytes: i64,
    content_type: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ImageRow> for ImageRecord {
    fn from(row: ImageRow) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let size_bytes = row.size_bytes as u64;

        Self {
            id: row.id,
            stored_name: row.stored_name,
            original_name: row.original_name,
            storage_path: row.storage_path,
            size_bytes,
            content_type: row.content_type,
            created_at: row.created_at,
        }
    }
}
