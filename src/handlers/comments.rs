/// Commentary handlers - form endpoints that redirect back to the post
/// detail view after each mutation
use crate::error::Result;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use super::see_other;

/// Form body for creating or updating a commentary
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(rename = "postId")]
    pub post_id: i64,
    pub text: String,
}

/// Form body carrying only the owning post, used by delete
#[derive(Debug, Deserialize)]
pub struct PostRef {
    #[serde(rename = "postId")]
    pub post_id: i64,
}

/// Create a commentary and redirect to its post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(form.post_id, &form.text).await?;

    Ok(see_other(&format!("/posts/post/{}", comment.post_id)))
}

/// Replace a commentary's text and redirect to its post
pub async fn update_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.update_comment(*comment_id, &form.text).await?;

    Ok(see_other(&format!("/posts/post/{}", form.post_id)))
}

/// Delete a commentary and redirect to its post. Deleting a missing id
/// still redirects.
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<i64>,
    form: web::Form<PostRef>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.delete_comment(*comment_id).await?;

    Ok(see_other(&format!("/posts/post/{}", form.post_id)))
}
