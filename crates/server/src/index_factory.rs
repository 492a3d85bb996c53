use std::sync::Arc;

use pictor_index::ImageIndex;
use pictor_index_memory::MemoryImageIndex;
#[cfg(feature = "postgres")]
use pictor_index_postgres::{PostgresImageIndex, PostgresIndexConfig};

use crate::config::IndexConfig;
use crate::error::ServerError;

/// Create a metadata index from the given configuration.
#[allow(clippy::unused_async)]
pub async fn create_index(config: &IndexConfig) -> Result<Arc<dyn ImageIndex>, ServerError> {
    let index: Arc<dyn ImageIndex> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryImageIndex::new()),
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = config.url.as_deref().ok_or_else(|| {
                ServerError::Config("index postgres backend requires [index] url".into())
            })?;

            let pg_config = PostgresIndexConfig::new(url).with_prefix(&config.prefix);

            let index = PostgresImageIndex::new(&pg_config)
                .await
                .map_err(|e| ServerError::Config(format!("index postgres: {e}")))?;

            Arc::new(index)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unknown index backend '{other}' (expected 'memory' or 'postgres')"
            )));
        }
    };

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;

    #[tokio::test]
    async fn memory_backend_builds() {
        let config = IndexConfig::default();
        let index = create_index(&config).await.unwrap();
        assert!(index.ping().await.is_ok());
    }

    #[tokio::test]
    async fn unknown_backend_is_a_config_error() {
        let config = IndexConfig {
            backend: "sqlite".into(),
            ..IndexConfig::default()
        };
        let err = create_index(&config).await.err().unwrap();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[cfg(feature = "postgres")]
    #[tokio::test]
    async fn postgres_backend_without_url_is_a_config_error() {
        let config = IndexConfig {
            backend: "postgres".into(),
            ..IndexConfig::default()
        };
        let err = create_index(&config).await.err().unwrap();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
