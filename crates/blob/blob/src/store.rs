use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;
use crate::types::StoredBlob;

/// Pluggable blob storage backend for image content.
///
/// Implementors provide the durable byte storage behind the upload pipeline.
/// The store owns the mapping from stored name to bytes and nothing else:
/// metadata (id, timestamps, content type) lives in the index.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob and return its storage address and written size.
    ///
    /// The store assigns a unique name derived from `original_name`'s
    /// extension; the original name is never used for addressing. The write
    /// is all-or-nothing: on error, no file is resolvable under the returned
    /// name.
    async fn put(&self, original_name: &str, data: Bytes) -> Result<StoredBlob, BlobError>;

    /// Retrieve a blob's content by stored name.
    ///
    /// Returns `None` if no blob exists under the name. Any name ever
    /// returned by [`put`](Self::put) remains retrievable until explicitly
    /// removed.
    async fn get(&self, stored_name: &str) -> Result<Option<Bytes>, BlobError>;

    /// Delete a blob by stored name. Returns `true` if the blob existed.
    async fn delete(&self, stored_name: &str) -> Result<bool, BlobError>;
}
