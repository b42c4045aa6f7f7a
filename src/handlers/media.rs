use axum::{
    body::Body,
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::error::{AppError, MessageResponse, Result};
use crate::handlers::form::PostForm;
use crate::models::UploadResponse;
use crate::AppState;

fn image_not_found() -> AppError {
    AppError::NotFound("Image not found".to_string())
}

/// Store an image without attaching it to a post
/// POST /upload
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let image = PostForm::read(multipart?)
        .await?
        .image
        .ok_or_else(|| AppError::Unprocessable("Field required: image".to_string()))?;

    let image_path = state.media.put(&image.file_name, image.data).await?;
    Ok(Json(UploadResponse { image_path }))
}

/// Remove an image file. Posts pointing at it keep their path.
/// DELETE /upload/:name
pub async fn delete_image(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let Path(name) = path?;
    if !state.media.delete(&name).await? {
        return Err(image_not_found());
    }
    Ok(Json(MessageResponse::new("Image deleted successfully")))
}

/// Serve raw image bytes
/// GET /images/:name
pub async fn get_image(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let Path(name) = path?;
    let data = state.media.get(&name).await?.ok_or_else(image_not_found)?;

    let mime = mime_guess::from_path(&name).first_or_octet_stream();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
