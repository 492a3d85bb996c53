use serde::{Deserialize, Serialize};

/// The result of persisting a blob: where it lives and how big it is.
///
/// Identity and timestamps belong to the metadata index, not the blob store;
/// the two are linked only through `stored_name`/`storage_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Server-generated, collision-resistant storage address.
    pub stored_name: String,
    /// Full path the blob was written to, stable for the blob's lifetime.
    pub storage_path: String,
    /// Exact number of bytes written.
    pub size_bytes: u64,
}
