use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::PaginationConfig;
use crate::error::{AppError, Result};

/// Post model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
}

/// Fields for a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the image, `Some(Some(_))` replaces it
    pub image_path: Option<Option<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_path.is_none()
    }
}

/// List query parameters
/// GET /posts?skip=0&limit=10
#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PostListQuery {
    /// Resolve to `(offset, limit)`: negatives are rejected, an oversized
    /// limit is clamped to `max_limit`.
    pub fn resolve(&self, config: &PaginationConfig) -> Result<(i64, i64)> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(config.default_limit);

        if skip < 0 {
            return Err(AppError::BadRequest("skip must not be negative".to_string()));
        }
        if limit < 0 {
            return Err(AppError::BadRequest("limit must not be negative".to_string()));
        }

        Ok((skip, limit.min(config.max_limit)))
    }
}

/// Upload confirmation
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub image_path: String,
}
