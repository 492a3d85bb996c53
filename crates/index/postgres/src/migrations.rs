use sqlx::PgPool;

/// Run the images table migration, creating the table and indexes if they do
/// not already exist.
pub async fn run_migrations(pool: &PgPool, prefix: &str) -> Result<(), sqlx::Error> {
    let table = format!("{prefix}images");

    let create_table = format!(
        "
        CREATE TABLE IF NOT EXISTS {table} (
            id            TEXT PRIMARY KEY,
            stored_name   TEXT NOT NULL UNIQUE,
            original_name TEXT NOT NULL,
            storage_path  TEXT NOT NULL,
            size_bytes    BIGINT NOT NULL,
            content_type  TEXT NOT NULL,
            created_at    TIMESTAMPTZ NOT NULL
        )
        "
    );

    sqlx::query(&create_table).execute(pool).await?;

    let indexes = [format!(
        "CREATE INDEX IF NOT EXISTS idx_{prefix}images_created_at ON {table} (created_at DESC)"
    )];

    for idx in &indexes {
        sqlx::query(idx).execute(pool).await?;
    }

    Ok(())
}
