use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use pictor_blob::error::BlobError;
use pictor_blob::store::BlobStore;
use pictor_blob::types::StoredBlob;

/// In-memory [`BlobStore`] backed by a [`DashMap`].
///
/// Storage paths are synthetic (`memory://<name>`). Intended for tests and
/// local development; nothing survives process exit.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    /// Create a new, empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, original_name: &str, data: Bytes) -> Result<StoredBlob, BlobError> {
        let stored_name = pictor_core::stored_name(original_name);
        let size_bytes = data.len() as u64;
        self.blobs.insert(stored_name.clone(), data);

        Ok(StoredBlob {
            storage_path: format!("memory://{stored_name}"),
            stored_name,
            size_bytes,
        })
    }

    async fn get(&self, stored_name: &str) -> Result<Option<Bytes>, BlobError> {
        Ok(self.blobs.get(stored_name).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, stored_name: &str) -> Result<bool, BlobError> {
        Ok(self.blobs.remove(stored_name).is_some())
    }
}
