use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    Json,
};

use crate::error::{AppError, MessageResponse, Result};
use crate::handlers::form::{required, PostForm};
use crate::models::{NewPost, Post, PostListQuery, PostPatch};
use crate::services::PostService;
use crate::AppState;

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// Create a post, storing the optional image first
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Post>> {
    let form = PostForm::read(multipart?).await?;
    let title = required(form.title, "title")?;
    let content = required(form.content, "content")?;

    let image_path = match form.image {
        Some(image) => Some(state.media.put(&image.file_name, image.data).await?),
        None => None,
    };

    let post = PostService::create(
        &state.db,
        NewPost {
            title,
            content,
            image_path,
        },
    )
    .await?;

    Ok(Json(post))
}

/// Partially update a post
/// PUT /posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Post>> {
    let Path(id) = path?;

    // Bail out before touching the media store
    PostService::get(&state.db, id)
        .await?
        .ok_or_else(post_not_found)?;

    let form = PostForm::read(multipart?).await?;

    let image_path = match form.image {
        Some(image) => Some(Some(state.media.put(&image.file_name, image.data).await?)),
        None if form.remove_image => Some(None),
        None => None,
    };

    let patch = PostPatch {
        title: form.title,
        content: form.content,
        image_path,
    };

    let post = PostService::update(&state.db, id, patch)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(Json(post))
}

/// Get a single post
/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Post>> {
    let Path(id) = path?;
    let post = PostService::get(&state.db, id)
        .await?
        .ok_or_else(post_not_found)?;
    Ok(Json(post))
}

/// List posts
/// GET /posts?skip=0&limit=10
pub async fn list_posts(
    State(state): State<AppState>,
    query: std::result::Result<Query<PostListQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>> {
    let Query(query) = query?;
    let (offset, limit) = query.resolve(&state.config.pagination)?;
    let posts = PostService::list(&state.db, offset, limit).await?;
    Ok(Json(posts))
}

/// Delete a post. Its image file is kept.
/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let Path(id) = path?;
    if !PostService::delete(&state.db, id).await? {
        return Err(post_not_found());
    }
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
