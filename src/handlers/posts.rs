/// Post handlers - HTTP endpoints for the listing, detail, create/update
/// multipart forms, image download and the like counter
use crate::error::{AppError, Result};
use crate::models::{ImageUpload, NewPost, PageRequest, PostUpdate};
use crate::services::PostService;
use crate::views::{Templates, POSTS_TEMPLATE, POST_TEMPLATE};
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use sqlx::PgPool;

use super::see_other;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_POSTS_PER_PAGE: i64 = 10;

/// Listing query parameters; all optional
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    #[serde(rename = "postsPerPage")]
    pub posts_per_page: Option<i64>,
    pub tag: Option<String>,
}

/// Render the paginated listing view
pub async fn list_posts(
    pool: web::Data<PgPool>,
    templates: web::Data<Templates>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let per_page = query.posts_per_page.unwrap_or(DEFAULT_POSTS_PER_PAGE);
    if page < 1 || per_page < 1 {
        return Err(AppError::BadRequest(
            "page and postsPerPage must be positive".to_string(),
        ));
    }

    let service = PostService::new((**pool).clone());
    let posts_page = service
        .posts_page(PageRequest::new(page, per_page, query.tag))
        .await?;

    let body = templates.render(POSTS_TEMPLATE, &posts_page)?;
    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(body))
}

/// Render the post detail view
pub async fn get_post(
    pool: web::Data<PgPool>,
    templates: web::Data<Templates>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let detail = service.find_post(*post_id).await?;

    let body = templates.render(POST_TEMPLATE, &detail)?;
    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(body))
}

/// Create a post from a multipart form and redirect to the listing
pub async fn create_post(pool: web::Data<PgPool>, payload: Multipart) -> Result<HttpResponse> {
    let form = PostForm::read(payload).await?;
    let new_post = NewPost {
        title: form.require_title()?,
        text: form.require_text()?,
        tags: form.tags,
        image: form
            .image
            .ok_or_else(|| AppError::BadRequest("missing image field".to_string()))?,
    };

    let service = PostService::new((**pool).clone());
    service.create_post(new_post).await?;

    Ok(see_other("/posts"))
}

/// Update a post from the same multipart shape and redirect to its detail
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let post_id = *post_id;
    let form = PostForm::read(payload).await?;
    let update = PostUpdate {
        id: post_id,
        title: form.require_title()?,
        text: form.require_text()?,
        tags: form.tags,
        image: form
            .image
            .ok_or_else(|| AppError::BadRequest("missing image field".to_string()))?,
    };

    let service = PostService::new((**pool).clone());
    service.update_post(update).await?;

    Ok(see_other(&format!("/posts/post/{post_id}")))
}

/// Delete a post and redirect to the listing
pub async fn delete_post(pool: web::Data<PgPool>, post_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id).await?;

    Ok(see_other("/posts"))
}

/// Raw image bytes for a post
pub async fn get_image(pool: web::Data<PgPool>, post_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let image = service.image(*post_id).await?;

    Ok(HttpResponse::Ok()
        .content_type(mime::IMAGE_JPEG)
        .body(image.data))
}

/// Increment the like counter and echo the new value as plain text
pub async fn like_post(pool: web::Data<PgPool>, post_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let likes = service.increment_likes(*post_id).await?;

    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_PLAIN_UTF_8)
        .body(likes.to_string()))
}

/// Fields collected from the create/update multipart form
#[derive(Debug, Default)]
struct PostForm {
    title: Option<String>,
    text: Option<String>,
    tags: Vec<String>,
    image: Option<ImageUpload>,
}

impl PostForm {
    async fn read(mut payload: Multipart) -> Result<PostForm> {
        let mut form = PostForm::default();

        while let Some(mut field) = payload.try_next().await? {
            let name = field.name().map(str::to_owned).unwrap_or_default();
            match name.as_str() {
                "title" => form.title = Some(read_text(&mut field).await?),
                "text" => form.text = Some(read_text(&mut field).await?),
                "tags" => {
                    let raw = read_text(&mut field).await?;
                    form.tags.extend(split_tags(&raw));
                }
                "image" => {
                    let file_name = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .unwrap_or("image")
                        .to_string();
                    let data = read_bytes(&mut field).await?;
                    form.image = Some(ImageUpload {
                        name: file_name,
                        size: data.len() as i64,
                        data,
                    });
                }
                _ => {
                    // Unknown fields are drained and ignored
                    read_bytes(&mut field).await?;
                }
            }
        }

        Ok(form)
    }

    fn require_title(&self) -> Result<String> {
        self.title
            .clone()
            .ok_or_else(|| AppError::BadRequest("missing title field".to_string()))
    }

    fn require_text(&self) -> Result<String> {
        self.text
            .clone()
            .ok_or_else(|| AppError::BadRequest("missing text field".to_string()))
    }
}

async fn read_bytes(field: &mut Field) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_text(field: &mut Field) -> Result<String> {
    let data = read_bytes(field).await?;
    String::from_utf8(data)
        .map_err(|_| AppError::BadRequest("form field is not valid UTF-8".to_string()))
}

/// Split a tags field on whitespace and commas; repeated fields accumulate.
fn split_tags(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags_on_whitespace_and_commas() {
        assert_eq!(split_tags("rust web"), vec!["rust", "web"]);
        assert_eq!(split_tags("rust, web"), vec!["rust", "web"]);
        assert_eq!(split_tags("  rust  "), vec!["rust"]);
    }

    #[test]
    fn test_split_tags_empty_input() {
        assert!(split_tags("").is_empty());
        assert!(split_tags("  , ,, ").is_empty());
    }

    #[test]
    fn test_split_tags_keeps_duplicates_for_store_side_dedupe() {
        assert_eq!(split_tags("a a"), vec!["a", "a"]);
    }

    #[test]
    fn test_missing_form_fields_are_bad_requests() {
        let form = PostForm::default();
        assert!(matches!(
            form.require_title(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(form.require_text(), Err(AppError::BadRequest(_))));
    }
}
