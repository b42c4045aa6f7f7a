use crate::db::Database;
use crate::error::Result;
use crate::models::{NewPost, Post, PostPatch};

/// Post persistence
pub struct PostService;

impl PostService {
    /// Insert a post and return it with its assigned id
    pub async fn create(db: &Database, post: NewPost) -> Result<Post> {
        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content, image_path)
            VALUES (?, ?, ?)
            RETURNING id, title, content, image_path
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_path)
        .fetch_one(db.pool())
        .await?;

        tracing::debug!("Created post {}", post.id);
        Ok(post)
    }

    /// Get a post by ID
    pub async fn get(db: &Database, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as(
            "SELECT id, title, content, image_path FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

        Ok(post)
    }

    /// List posts in id order. Callers are expected to pass non-negative bounds.
    pub async fn list(db: &Database, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as(
            "SELECT id, title, content, image_path FROM posts ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db.pool())
        .await?;

        Ok(posts)
    }

    /// Apply the supplied fields only. Returns `None` if the post does not exist.
    pub async fn update(db: &Database, id: i64, patch: PostPatch) -> Result<Option<Post>> {
        if patch.is_empty() {
            return Self::get(db, id).await;
        }

        let (set_image, image_path) = match patch.image_path {
            Some(path) => (true, path),
            None => (false, None),
        };

        let post = sqlx::query_as(
            r#"
            UPDATE posts SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                image_path = CASE WHEN ? THEN ? ELSE image_path END
            WHERE id = ?
            RETURNING id, title, content, image_path
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(set_image)
        .bind(&image_path)
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

        if post.is_some() {
            tracing::debug!("Updated post {}", id);
        }
        Ok(post)
    }

    /// Hard delete. The post's image file is left alone.
    pub async fn delete(db: &Database, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(db.pool())
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::debug!("Deleted post {}", id);
        }
        Ok(removed)
    }
}
