use thiserror::Error;

/// Errors returned by the Pictor client.
#[derive(Debug, Error)]
pub enum Error {
    /// The client could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP request failed before a response was received.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error payload.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field from the response body, or the raw body.
        message: String,
    },
}
