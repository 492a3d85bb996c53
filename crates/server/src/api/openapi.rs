use super::schemas::{
    ErrorResponse, HealthResponse, ImageBody, ListImagesResponse, UploadResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Pictor API",
        version = "0.1.0",
        description = "HTTP API for the Pictor image service. Upload images and browse the stored catalog.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Images", description = "Image upload and catalog listing")
    ),
    paths(
        super::health::health,
        super::upload::upload,
        super::images::list_images,
    ),
    components(schemas(
        HealthResponse,
        ImageBody, UploadResponse, ListImagesResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;
