use crate::models::Post;
use sqlx::PgConnection;

/// Insert a new post with a zeroed like counter, returning the generated id.
pub async fn insert_post(
    conn: &mut PgConnection,
    title: &str,
    text: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO posts (title, post_text, likes)
        VALUES ($1, $2, 0)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(text)
    .fetch_one(conn)
    .await
}

/// Find a post by id
pub async fn find_post(conn: &mut PgConnection, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, post_text, likes
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(conn)
    .await
}

/// Replace a post's title and text. Likes and dependents are untouched.
pub async fn update_post(
    conn: &mut PgConnection,
    post_id: i64,
    title: &str,
    text: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = $1, post_text = $2
        WHERE id = $3
        "#,
    )
    .bind(title)
    .bind(text)
    .bind(post_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a post by id. Comments, tag links and the image go with it via
/// cascade. Returns the number of rows removed.
pub async fn delete_post(conn: &mut PgConnection, post_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Count all posts
pub async fn count_posts(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(conn)
        .await
}

/// Count posts carrying the given tag
pub async fn count_posts_with_tag(conn: &mut PgConnection, tag: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT p.id)
        FROM posts p
        JOIN post_tags pt ON pt.post_id = p.id
        JOIN tags t ON t.id = pt.tag_id
        WHERE t.tag_name = $1
        "#,
    )
    .bind(tag)
    .fetch_one(conn)
    .await
}

/// Fetch one page of posts in id (creation) order
pub async fn find_page(
    conn: &mut PgConnection,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, post_text, likes
        FROM posts
        ORDER BY id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await
}

/// Fetch one page of posts carrying the given tag. Grouping by the post id
/// dedupes posts that carry several tags.
pub async fn find_page_with_tag(
    conn: &mut PgConnection,
    tag: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.title, p.post_text, p.likes
        FROM posts p
        JOIN post_tags pt ON pt.post_id = p.id
        JOIN tags t ON t.id = pt.tag_id
        WHERE t.tag_name = $1
        GROUP BY p.id
        ORDER BY p.id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(tag)
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await
}

/// Increment the like counter. The new value is read back by a separate
/// statement so a concurrent delete surfaces as not-found on the read.
pub async fn bump_likes(conn: &mut PgConnection, post_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET likes = likes + 1
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Read the current like counter for a post
pub async fn find_likes(
    conn: &mut PgConnection,
    post_id: i64,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT likes FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(conn)
        .await
}

/// Ceiling division of a row count into pages. Zero rows means zero pages.
pub fn total_pages(count: i64, per_page: i64) -> i64 {
    (count + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(2, 1), 2);
    }

    #[test]
    fn test_total_pages_zero_rows_zero_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(0, 1), 0);
    }

    #[test]
    fn test_total_pages_matches_ceil() {
        for per_page in 1..=13i64 {
            for count in 0..=100i64 {
                let expected = (count as f64 / per_page as f64).ceil() as i64;
                assert_eq!(total_pages(count, per_page), expected);
            }
        }
    }
}
