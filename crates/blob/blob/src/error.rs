use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// A write to the storage backend failed (disk full, permissions, I/O).
    ///
    /// Guaranteed to surface before any index insert runs, and never leaves a
    /// partially-written file resolvable under its final name.
    #[error("blob storage error: {0}")]
    Storage(String),

    /// The stored name is not a valid storage address (path separators,
    /// leading dots, empty). Stored names are server-generated, so this
    /// indicates a caller bug rather than client input.
    #[error("invalid stored name: {0}")]
    InvalidName(String),
}
