use async_trait::async_trait;

use crate::error::IndexError;
use crate::record::{ImageRecord, NewImage};

/// Trait for metadata index storage backends.
///
/// Implementations must be `Send + Sync` and tolerate concurrent access:
/// listing runs concurrently with inserts, and a reader must never observe a
/// partially-inserted record.
#[async_trait]
pub trait ImageIndex: Send + Sync {
    /// Persist a new upload record, assigning `id` and `created_at`.
    ///
    /// Atomic: either the full record is visible to subsequent queries or
    /// none of it is. Returns the record including server-assigned fields.
    async fn insert(&self, image: NewImage) -> Result<ImageRecord, IndexError>;

    /// Return every record, newest first (`created_at` descending).
    ///
    /// Ties are broken by insertion order; records are never dropped or
    /// duplicated.
    async fn list_all(&self) -> Result<Vec<ImageRecord>, IndexError>;

    /// Cheap reachability probe.
    ///
    /// The upload pipeline calls this before writing the blob, so a known-dead
    /// index fails the request without orphaning a file.
    async fn ping(&self) -> Result<(), IndexError>;
}
