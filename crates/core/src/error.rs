use thiserror::Error;

/// Errors produced while validating an upload before any bytes are stored.
///
/// All variants are client-caused and their `Display` messages are safe to
/// surface verbatim in an HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The declared content type is not in the allow-list.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The payload size exceeds the configured ceiling.
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// The request carried no file part.
    #[error("No file uploaded")]
    MissingPayload,
}
