use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted upload: the sole entity the metadata index owns.
///
/// Created atomically as a unit, never updated afterward. The blob store owns
/// the bytes behind `stored_name`; the two are linked only through
/// `stored_name`/`storage_path`, with no transactional foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImageRecord {
    /// Unique identifier (UUID v7), assigned by the index on insert.
    pub id: String,
    /// Server-generated storage address; unique in the blob namespace.
    pub stored_name: String,
    /// Client-supplied display name; never used for addressing.
    pub original_name: String,
    /// Path the blob was written to; stable for the record's lifetime.
    pub storage_path: String,
    /// Exact byte length written to the blob store.
    pub size_bytes: u64,
    /// Declared MIME type, validated against the allow-list at ingress.
    pub content_type: String,
    /// When the record was inserted.
    pub created_at: DateTime<Utc>,
}

/// The insert-side view of a record: everything the caller knows before the
/// index assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewImage {
    /// Server-generated storage address.
    pub stored_name: String,
    /// Client-supplied display name.
    pub original_name: String,
    /// Path the blob was written to.
    pub storage_path: String,
    /// Exact byte length written to the blob store.
    pub size_bytes: u64,
    /// Declared MIME type.
    pub content_type: String,
}

impl NewImage {
    /// Assign server-side fields, producing the record to persist.
    ///
    /// Both backends go through this so id and timestamp assignment stay
    /// identical regardless of the storage engine.
    pub fn into_record(self) -> ImageRecord {
        ImageRecord {
            id: Uuid::now_v7().to_string(),
            stored_name: self.stored_name,
            original_name: self.original_name,
            storage_path: self.storage_path,
            size_bytes: self.size_bytes,
            content_type: self.content_type,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_image() -> NewImage {
        NewImage {
            stored_name: "img-0001.png".into(),
            original_name: "cat.png".into(),
            storage_path: "uploads/img-0001.png".into(),
            size_bytes: 42,
            content_type: "image/png".into(),
        }
    }

    #[test]
    fn into_record_assigns_id_and_timestamp() {
        let before = Utc::now();
        let record = new_image().into_record();

        assert!(!record.id.is_empty());
        assert!(record.created_at >= before);
        assert_eq!(record.stored_name, "img-0001.png");
        assert_eq!(record.size_bytes, 42);
    }

    #[test]
    fn assigned_ids_are_unique() {
        let a = new_image().into_record();
        let b = new_image().into_record();
        assert_ne!(a.id, b.id);
    }
}
