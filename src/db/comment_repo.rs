use crate::models::Comment;
use sqlx::{PgConnection, Row};
use std::collections::HashMap;

/// Create a new commentary on a post, returning the stored row
pub async fn insert_comment(
    conn: &mut PgConnection,
    post_id: i64,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO commentaries (post_id, commentary_text)
        VALUES ($1, $2)
        RETURNING id, post_id, commentary_text
        "#,
    )
    .bind(post_id)
    .bind(text)
    .fetch_one(conn)
    .await
}

/// Find a single commentary by id
pub async fn find_comment(
    conn: &mut PgConnection,
    comment_id: i64,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, commentary_text
        FROM commentaries
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(conn)
    .await
}

/// All commentaries for a post in creation (id) order
pub async fn find_by_post(
    conn: &mut PgConnection,
    post_id: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, commentary_text
        FROM commentaries
        WHERE post_id = $1
        ORDER BY id
        "#,
    )
    .bind(post_id)
    .fetch_all(conn)
    .await
}

/// Replace a commentary's text
pub async fn update_comment(
    conn: &mut PgConnection,
    comment_id: i64,
    text: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE commentaries
        SET commentary_text = $1
        WHERE id = $2
        "#,
    )
    .bind(text)
    .bind(comment_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a commentary by id. Zero rows affected is not an error.
pub async fn delete_comment(conn: &mut PgConnection, comment_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM commentaries WHERE id = $1")
        .bind(comment_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Comment counts for a batch of post ids in one grouped query. Posts with
/// no comments are absent from the map; callers default to zero.
pub async fn count_for_posts(
    conn: &mut PgConnection,
    post_ids: &[i64],
) -> Result<HashMap<i64, i64>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query(
        r#"
        SELECT post_id, COUNT(*) AS comment_count
        FROM commentaries
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| (row.get("post_id"), row.get("comment_count")))
        .collect())
}
