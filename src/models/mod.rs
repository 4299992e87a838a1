/// Data models for blog-service
///
/// This module defines structures for:
/// - Post: blog posts with a like counter and an owned image
/// - Tag: shared labels attached to posts through a junction table
/// - Comment: per-post commentary rows, ordered by creation
/// - Paging types used by the post listing
use serde::{Deserialize, Serialize};

/// Post entity as stored in the posts table. Tags, comments and the image
/// live in their own tables and are attached by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[sqlx(rename = "post_text")]
    pub text: String,
    pub likes: i32,
}

impl Post {
    /// Copy of this post with title and text replaced. Id and likes are
    /// preserved; the like counter is only ever server-incremented.
    pub fn with_content(self, title: String, text: String) -> Post {
        Post {
            title,
            text,
            ..self
        }
    }
}

/// Tag entity - unique by name, shared across posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    #[sqlx(rename = "tag_name")]
    pub name: String,
}

/// Comment entity - owned by a post, cascade-deleted with it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    #[sqlx(rename = "commentary_text")]
    pub text: String,
}

/// Image row owned 1:1 by a post. The size is the caller-declared byte
/// count and is not verified against the payload length.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Image {
    pub post_id: i64,
    #[sqlx(rename = "image_name")]
    pub name: String,
    #[sqlx(rename = "image_size")]
    pub size: i64,
    #[sqlx(rename = "image_data")]
    pub data: Vec<u8>,
}

/// Uploaded image at the domain boundary: byte buffer plus filename and
/// declared size. Multipart parsing stays in the handler layer.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub name: String,
    pub size: i64,
    pub data: Vec<u8>,
}

/// Inbound payload for creating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    pub image: ImageUpload,
}

/// Inbound payload for updating a post. Replaces title, text, image and
/// the full tag set; likes and comments are untouched.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    pub image: ImageUpload,
}

/// Listing request: 1-based page number, page size, optional tag filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
    pub tag: Option<String>,
}

impl PageRequest {
    /// A blank tag filter is treated as no filter.
    pub fn new(page: i64, per_page: i64, tag: Option<String>) -> Self {
        let tag = tag.filter(|t| !t.trim().is_empty());
        Self {
            page,
            per_page,
            tag,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

/// Post projection used in listings: no comment bodies, just the count.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub likes: i32,
    pub tags: Vec<Tag>,
    pub comment_count: i64,
}

impl PostSummary {
    pub fn from_post(post: Post, tags: Vec<Tag>, comment_count: i64) -> Self {
        Self {
            id: post.id,
            title: post.title,
            text: post.text,
            likes: post.likes,
            tags,
            comment_count,
        }
    }
}

/// Result envelope for the paginated listing. The requested page and tag
/// filter are echoed back for the view.
#[derive(Debug, Clone, Serialize)]
pub struct PostsPage {
    pub items: Vec<PostSummary>,
    pub page: i64,
    pub total_pages: i64,
    pub per_page: i64,
    pub tag: Option<String>,
}

/// Full post view: row fields plus tags and comments in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub likes: i32,
    pub tags: Vec<Tag>,
    pub comments: Vec<Comment>,
}

impl PostDetail {
    pub fn assemble(post: Post, tags: Vec<Tag>, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            text: post.text,
            likes: post.likes,
            tags,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_keeps_tag() {
        let request = PageRequest::new(1, 10, Some("rust".to_string()));
        assert_eq!(request.tag.as_deref(), Some("rust"));
    }

    #[test]
    fn test_page_request_blank_tag_means_no_filter() {
        assert_eq!(PageRequest::new(1, 10, Some(String::new())).tag, None);
        assert_eq!(PageRequest::new(1, 10, Some("   ".to_string())).tag, None);
        assert_eq!(PageRequest::new(1, 10, None).tag, None);
    }

    #[test]
    fn test_page_request_offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10, None).offset(), 0);
        assert_eq!(PageRequest::new(2, 10, None).offset(), 10);
        assert_eq!(PageRequest::new(3, 7, None).offset(), 14);
    }

    #[test]
    fn test_with_content_preserves_id_and_likes() {
        let post = Post {
            id: 42,
            title: "old".to_string(),
            text: "old text".to_string(),
            likes: 7,
        };
        let updated = post.with_content("new".to_string(), "new text".to_string());
        assert_eq!(updated.id, 42);
        assert_eq!(updated.likes, 7);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.text, "new text");
    }

    #[test]
    fn test_summary_carries_enrichment() {
        let post = Post {
            id: 1,
            title: "t".to_string(),
            text: "b".to_string(),
            likes: 0,
        };
        let tags = vec![Tag {
            id: 5,
            name: "x".to_string(),
        }];
        let summary = PostSummary::from_post(post, tags, 3);
        assert_eq!(summary.tags.len(), 1);
        assert_eq!(summary.comment_count, 3);
    }
}
