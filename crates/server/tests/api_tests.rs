use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use tower::ServiceExt;

use pictor_blob_memory::MemoryBlobStore;
use pictor_core::UploadPolicy;
use pictor_index::error::IndexError;
use pictor_index::record::{ImageRecord, NewImage};
use pictor_index::store::ImageIndex;
use pictor_index_memory::MemoryImageIndex;
use pictor_server::api::AppState;

// -- Failing index double -------------------------------------------------

struct FailingIndex;

#[async_trait]
impl ImageIndex for FailingIndex {
    async fn insert(&self, _image: NewImage) -> Result<ImageRecord, IndexError> {
        Err(IndexError::Unavailable("connection refused".into()))
    }

    async fn list_all(&self) -> Result<Vec<ImageRecord>, IndexError> {
        Err(IndexError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), IndexError> {
        Err(IndexError::Unavailable("connection refused".into()))
    }
}

// -- Helpers --------------------------------------------------------------

const BOUNDARY: &str = "pictor-test-boundary";

fn build_test_state() -> AppState {
    build_test_state_with_policy(UploadPolicy::default())
}

fn build_test_state_with_policy(policy: UploadPolicy) -> AppState {
    AppState {
        blob: Arc::new(MemoryBlobStore::new()),
        index: Arc::new(MemoryImageIndex::new()),
        policy,
        public_url: "http://localhost:3001".into(),
        uploads_dir: None,
    }
}

fn build_app(state: AppState) -> axum::Router {
    pictor_server::api::router(state)
}

/// Hand-roll a multipart body with a single file part.
fn file_part_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A multipart body whose only part is a plain text field (no filename).
fn text_part_body() -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\r\n\
         just text\r\n\
         --{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri("/api/upload")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn list_count(app: &axum::Router) -> u64 {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/images")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response_json(response).await["count"].as_u64().unwrap()
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok_with_index_status() {
    let app = build_app(build_test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["index"], "ok");
}

#[tokio::test]
async fn upload_png_returns_201_with_exact_size_and_url() {
    let app = build_app(build_test_state());

    let payload = vec![0x89u8; 10 * 1024];
    let response = app
        .clone()
        .oneshot(upload_request(file_part_body(
            "holiday.png",
            "image/png",
            &payload,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Image uploaded successfully");
    assert_eq!(json["image"]["size"], 10240);
    assert_eq!(json["image"]["name"], "holiday.png");

    let url = json["image"]["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:3001/uploads/img-"));
    assert!(url.ends_with(".png"));
    assert!(json["image"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(json["image"]["uploadedAt"].is_string());

    assert_eq!(list_count(&app).await, 1);
}

#[tokio::test]
async fn upload_rejects_unsupported_content_type_without_side_effects() {
    let blob = Arc::new(MemoryBlobStore::new());
    let state = AppState {
        blob: Arc::clone(&blob) as Arc<dyn pictor_blob::BlobStore>,
        ..build_test_state()
    };
    let app = build_app(state);

    let response = app
        .clone()
        .oneshot(upload_request(file_part_body(
            "notes.txt",
            "text/plain",
            b"hello",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert!(
        json["error"].as_str().unwrap().contains("text/plain"),
        "validation message should name the rejected type"
    );

    assert_eq!(list_count(&app).await, 0);
    assert!(blob.is_empty(), "rejected upload must not write a blob");
}

#[tokio::test]
async fn upload_rejects_payload_over_ceiling_without_side_effects() {
    let policy = UploadPolicy::new(vec!["image/jpeg".into()], 1024);
    let app = build_app(build_test_state_with_policy(policy));

    let oversized = vec![0u8; 4096];
    let response = app
        .clone()
        .oneshot(upload_request(file_part_body(
            "big.jpg",
            "image/jpeg",
            &oversized,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("File too large"));

    assert_eq!(list_count(&app).await, 0);
}

#[tokio::test]
async fn upload_without_file_field_returns_400_no_file_uploaded() {
    let app = build_app(build_test_state());

    let response = app
        .clone()
        .oneshot(upload_request(text_part_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "No file uploaded");
    assert!(json.get("success").is_none());

    assert_eq!(list_count(&app).await, 0);
}

#[tokio::test]
async fn three_uploads_list_newest_first() {
    let app = build_app(build_test_state());

    for name in ["first.png", "second.gif", "third.webp"] {
        let content_type = match name.rsplit_once('.').unwrap().1 {
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "image/png",
        };
        let response = app
            .clone()
            .oneshot(upload_request(file_part_body(name, content_type, b"data")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/images")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 3);

    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);

    let timestamps: Vec<chrono::DateTime<chrono::Utc>> = images
        .iter()
        .map(|img| {
            chrono::DateTime::parse_from_rfc3339(img["uploadedAt"].as_str().unwrap())
                .unwrap()
                .with_timezone(&chrono::Utc)
        })
        .collect();
    for pair in timestamps.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "images must be ordered newest first: {timestamps:?}"
        );
    }
}

#[tokio::test]
async fn uploaded_bytes_are_retrievable_via_static_route() {
    let root = std::env::temp_dir().join(format!("pictor-api-test-{}", uuid::Uuid::now_v7()));
    let blob = pictor_blob_fs::FsBlobStore::new(&root).await.unwrap();

    let state = AppState {
        blob: Arc::new(blob),
        index: Arc::new(MemoryImageIndex::new()),
        policy: UploadPolicy::default(),
        public_url: "http://localhost:3001".into(),
        uploads_dir: Some(root.to_str().unwrap().to_owned()),
    };
    let app = build_app(state);

    let payload = b"\x89PNG\r\n\x1a\ndistinctive-bytes".to_vec();
    let response = app
        .clone()
        .oneshot(upload_request(file_part_body(
            "round-trip.png",
            "image/png",
            &payload,
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;

    // Derive the request path from the returned URL.
    let url = json["image"]["url"].as_str().unwrap();
    let path = url.strip_prefix("http://localhost:3001").unwrap();

    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], &payload[..]);

    // Absent names 404.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/uploads/img-does-not-exist.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn unavailable_index_fails_fast_without_writing_a_blob() {
    let blob = Arc::new(MemoryBlobStore::new());
    let state = AppState {
        blob: Arc::clone(&blob) as Arc<dyn pictor_blob::BlobStore>,
        index: Arc::new(FailingIndex),
        policy: UploadPolicy::default(),
        public_url: "http://localhost:3001".into(),
        uploads_dir: None,
    };
    let app = build_app(state);

    let response = app
        .clone()
        .oneshot(upload_request(file_part_body(
            "doomed.png",
            "image/png",
            b"data",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    // Generic message only; no backend detail leaks.
    assert!(!json["error"].as_str().unwrap().contains("connection refused"));

    assert!(blob.is_empty(), "fail-fast must not write a blob");
}

#[tokio::test]
async fn listing_failure_returns_500_with_generic_message() {
    let state = AppState {
        blob: Arc::new(MemoryBlobStore::new()),
        index: Arc::new(FailingIndex),
        policy: UploadPolicy::default(),
        public_url: "http://localhost:3001".into(),
        uploads_dir: None,
    };
    let app = build_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/images")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to fetch images");
}
