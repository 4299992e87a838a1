/// Post service - post lifecycle, paginated listing, likes and images
use crate::db::{comment_repo, image_repo, post_repo, tag_repo};
use crate::error::{AppError, Result};
use crate::models::{
    Image, NewPost, PageRequest, PostDetail, PostSummary, PostUpdate, PostsPage,
};
use sqlx::PgPool;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post with its image and tag set in one transaction. A
    /// failure anywhere (image insert, tag bind) rolls the whole
    /// sequence back.
    pub async fn create_post(&self, new_post: NewPost) -> Result<PostDetail> {
        let NewPost {
            title,
            text,
            tags,
            image,
        } = new_post;

        let mut tx = self.pool.begin().await?;

        let post_id = post_repo::insert_post(&mut *tx, &title, &text).await?;

        let image = Image {
            post_id,
            name: image.name,
            size: image.size,
            data: image.data,
        };
        image_repo::insert_image(&mut *tx, &image).await?;

        let resolved = tag_repo::merge(&mut *tx, &tags).await?;
        tag_repo::bind_tags_to_post(&mut *tx, post_id, &resolved).await?;

        tx.commit().await?;

        tracing::info!(post_id, "created post");

        Ok(PostDetail {
            id: post_id,
            title,
            text,
            likes: 0,
            tags: resolved,
            comments: Vec::new(),
        })
    }

    /// Replace a post's title, text, image and tag set in one transaction.
    /// Id, like counter and comments are preserved. Tag rewiring is a full
    /// unbind-then-rebind replace.
    pub async fn update_post(&self, update: PostUpdate) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let post = post_repo::find_post(&mut *tx, update.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", update.id)))?;

        let post = post.with_content(update.title, update.text);
        post_repo::update_post(&mut *tx, post.id, &post.title, &post.text).await?;

        let image = Image {
            post_id: post.id,
            name: update.image.name,
            size: update.image.size,
            data: update.image.data,
        };
        image_repo::update_image(&mut *tx, &image).await?;

        tag_repo::unbind_tags_from_post(&mut *tx, post.id).await?;
        let resolved = tag_repo::merge(&mut *tx, &update.tags).await?;
        tag_repo::bind_tags_to_post(&mut *tx, post.id, &resolved).await?;

        tx.commit().await?;

        tracing::info!(post_id = post.id, "updated post");
        Ok(())
    }

    /// Full post view with tags and comments in creation order
    pub async fn find_post(&self, post_id: i64) -> Result<PostDetail> {
        let mut conn = self.pool.acquire().await?;

        let post = post_repo::find_post(&mut *conn, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;
        let tags = tag_repo::find_by_post(&mut *conn, post_id).await?;
        let comments = comment_repo::find_by_post(&mut *conn, post_id).await?;

        Ok(PostDetail::assemble(post, tags, comments))
    }

    /// Paginated listing, optionally filtered by tag. The page slice is
    /// enriched with tag lists and comment counts through two batched
    /// queries over the slice's post ids. A page past the end yields an
    /// empty item list with the total still computed.
    pub async fn posts_page(&self, request: PageRequest) -> Result<PostsPage> {
        let mut conn = self.pool.acquire().await?;

        let (count, posts) = match request.tag.as_deref() {
            None => {
                let count = post_repo::count_posts(&mut *conn).await?;
                let posts =
                    post_repo::find_page(&mut *conn, request.per_page, request.offset()).await?;
                (count, posts)
            }
            Some(tag) => {
                let count = post_repo::count_posts_with_tag(&mut *conn, tag).await?;
                let posts = post_repo::find_page_with_tag(
                    &mut *conn,
                    tag,
                    request.per_page,
                    request.offset(),
                )
                .await?;
                (count, posts)
            }
        };

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let mut tags_by_post = tag_repo::find_for_posts(&mut *conn, &post_ids).await?;
        let mut comment_counts = comment_repo::count_for_posts(&mut *conn, &post_ids).await?;

        let items: Vec<PostSummary> = posts
            .into_iter()
            .map(|post| {
                let tags = tags_by_post.remove(&post.id).unwrap_or_default();
                let comment_count = comment_counts.remove(&post.id).unwrap_or(0);
                PostSummary::from_post(post, tags, comment_count)
            })
            .collect();

        Ok(PostsPage {
            items,
            page: request.page,
            total_pages: post_repo::total_pages(count, request.per_page),
            per_page: request.per_page,
            tag: request.tag,
        })
    }

    /// Raw image owned by a post
    pub async fn image(&self, post_id: i64) -> Result<Image> {
        let mut conn = self.pool.acquire().await?;

        image_repo::find_by_post(&mut *conn, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("image for post {post_id}")))
    }

    /// Increment the like counter and return the new value. The update and
    /// the read-back are separate statements on one connection; if the row
    /// vanishes in between the read raises not-found.
    pub async fn increment_likes(&self, post_id: i64) -> Result<i32> {
        let mut conn = self.pool.acquire().await?;

        post_repo::bump_likes(&mut *conn, post_id).await?;
        post_repo::find_likes(&mut *conn, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))
    }

    /// Delete a post and, via cascade, its comments, tag links and image.
    /// Deleting a missing id is a silent no-op.
    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        let deleted = post_repo::delete_post(&mut *conn, post_id).await?;
        if deleted == 0 {
            tracing::debug!(post_id, "delete of missing post ignored");
        } else {
            tracing::info!(post_id, "deleted post");
        }
        Ok(())
    }
}
