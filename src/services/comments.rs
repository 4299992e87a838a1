/// Comment service - commentary creation, update and removal
use crate::db::comment_repo;
use crate::error::{AppError, Result};
use crate::models::Comment;
use sqlx::PgPool;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a commentary. A missing post surfaces as a foreign key
    /// violation from the store.
    pub async fn create_comment(&self, post_id: i64, text: &str) -> Result<Comment> {
        let mut conn = self.pool.acquire().await?;

        let comment = comment_repo::insert_comment(&mut *conn, post_id, text).await?;
        tracing::info!(comment_id = comment.id, post_id, "created commentary");
        Ok(comment)
    }

    /// Replace a commentary's text; not-found when the id is absent
    pub async fn update_comment(&self, comment_id: i64, text: &str) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        let comment = comment_repo::find_comment(&mut *conn, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("commentary {comment_id}")))?;
        comment_repo::update_comment(&mut *conn, comment.id, text).await?;
        Ok(())
    }

    /// Delete a commentary. Deleting a missing id is a silent no-op.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        let deleted = comment_repo::delete_comment(&mut *conn, comment_id).await?;
        if deleted == 0 {
            tracing::debug!(comment_id, "delete of missing commentary ignored");
        }
        Ok(())
    }
}
