//! Pictor HTTP Client
//!
//! A native Rust client for the Pictor image service REST API.
//!
//! # Quick Start
//!
//! ```no_run
//! use pictor_client::PictorClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pictor_client::Error> {
//!     let client = PictorClient::new("http://localhost:3001");
//!
//!     // Check health
//!     if client.health().await? {
//!         println!("Server is healthy");
//!     }
//!
//!     // Upload an image
//!     let bytes = std::fs::read("holiday.png").expect("file should exist");
//!     let image = client.upload("holiday.png", "image/png", bytes).await?;
//!     println!("Stored at {}", image.url);
//!
//!     // Browse the catalog, newest first
//!     for image in client.list_images().await? {
//!         println!("{} ({} bytes) -> {}", image.name, image.size, image.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod error;

pub use error::Error;

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One image as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSummary {
    /// Record identifier.
    pub id: String,
    /// Client-supplied display name.
    pub name: String,
    /// Retrieval URL for the stored content.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// When the image was uploaded.
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    image: ImageSummary,
}

#[derive(Debug, Deserialize)]
struct ListImagesResponse {
    images: Vec<ImageSummary>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the Pictor image service.
#[derive(Debug, Clone)]
pub struct PictorClient {
    client: Client,
    base_url: String,
}

/// Builder for configuring a [`PictorClient`].
#[derive(Debug)]
pub struct PictorClientBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl PictorClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PictorClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(PictorClient {
            client,
            base_url: self.base_url,
        })
    }
}

impl PictorClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pictor_client::PictorClient;
    ///
    /// let client = PictorClient::new("http://localhost:3001");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        PictorClientBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> PictorClientBuilder {
        PictorClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the server is healthy.
    pub async fn health(&self) -> Result<bool, Error> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Upload an image from in-memory bytes.
    ///
    /// `filename` is the display name (its extension also shapes the stored
    /// name); `content_type` must be one of the server's allow-listed image
    /// types.
    pub async fn upload(
        &self,
        filename: impl Into<String>,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ImageSummary, Error> {
        let part = Part::bytes(bytes)
            .file_name(filename.into())
            .mime_str(content_type)
            .map_err(|e| Error::Configuration(format!("invalid content type: {e}")))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: UploadResponse = response.json().await?;
        Ok(body.image)
    }

    /// List all stored images, newest first.
    pub async fn list_images(&self) -> Result<Vec<ImageSummary>, Error> {
        let response = self
            .client
            .get(format!("{}/api/images", self.base_url))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: ListImagesResponse = response.json().await?;
        Ok(body.images)
    }

    /// Download an image's raw bytes by its retrieval URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Turn a non-success response into [`Error::Api`], extracting the
    /// server's `error` field when present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or(raw);

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
