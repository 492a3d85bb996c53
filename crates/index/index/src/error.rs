use thiserror::Error;

/// Errors that can occur during metadata index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The backing store is unreachable.
    ///
    /// Surfaced immediately, never silently retried. The upload pipeline
    /// probes for this before the blob write so a dead index fails fast.
    #[error("index unavailable: {0}")]
    Unavailable(String),

    /// A query or persistence error from the backing store.
    #[error("index storage error: {0}")]
    Storage(String),
}
