use async_trait::async_trait;
use tokio::sync::RwLock;

use pictor_index::error::IndexError;
use pictor_index::record::{ImageRecord, NewImage};
use pictor_index::store::ImageIndex;

/// In-memory [`ImageIndex`] backed by an insertion-ordered `Vec`.
///
/// The write lock makes each insert atomic with respect to readers; the
/// stable sort on read preserves insertion order for records sharing a
/// timestamp.
#[derive(Debug, Default)]
pub struct MemoryImageIndex {
    records: RwLock<Vec<ImageRecord>>,
}

impl MemoryImageIndex {
    /// Create a new, empty in-memory index.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageIndex for MemoryImageIndex {
    async fn insert(&self, image: NewImage) -> Result<ImageRecord, IndexError> {
        let record = image.into_record();
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ImageRecord>, IndexError> {
        let mut records = self.records.read().await.clone();
        // Stable sort: ties keep their insertion order.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn ping(&self) -> Result<(), IndexError> {
        Ok(())
    }
}
