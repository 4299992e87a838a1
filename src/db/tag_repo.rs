use crate::models::Tag;
use sqlx::{PgConnection, Row};
use std::collections::HashMap;

/// Insert-or-resolve the given tag names. Every name is guaranteed to exist
/// afterwards; the returned rows are in store order, not input order.
/// Duplicate input names resolve to a single row. Empty input returns empty
/// without touching the store.
pub async fn merge(conn: &mut PgConnection, names: &[String]) -> Result<Vec<Tag>, sqlx::Error> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query(
        r#"
        INSERT INTO tags (tag_name)
        SELECT DISTINCT name FROM unnest($1::text[]) AS name
        ON CONFLICT (tag_name) DO NOTHING
        "#,
    )
    .bind(names)
    .execute(&mut *conn)
    .await?;

    find_by_names(conn, names).await
}

async fn find_by_names(conn: &mut PgConnection, names: &[String]) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, tag_name
        FROM tags
        WHERE tag_name = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(names)
    .fetch_all(conn)
    .await
}

/// Attach resolved tags to a post. Fails with a foreign key violation when
/// the post or any tag id does not exist.
pub async fn bind_tags_to_post(
    conn: &mut PgConnection,
    post_id: i64,
    tags: &[Tag],
) -> Result<(), sqlx::Error> {
    if tags.is_empty() {
        return Ok(());
    }

    let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
    sqlx::query(
        r#"
        INSERT INTO post_tags (post_id, tag_id)
        SELECT $1, tag_id FROM unnest($2::bigint[]) AS tag_id
        "#,
    )
    .bind(post_id)
    .bind(&tag_ids)
    .execute(conn)
    .await?;

    Ok(())
}

/// Remove every junction row for a post. Update rewires tags by unbinding
/// and re-binding the new resolved set, a full replace rather than a diff.
pub async fn unbind_tags_from_post(
    conn: &mut PgConnection,
    post_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Tags attached to one post, in tag id order
pub async fn find_by_post(conn: &mut PgConnection, post_id: i64) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.tag_name
        FROM tags t
        JOIN post_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = $1
        ORDER BY t.id
        "#,
    )
    .bind(post_id)
    .fetch_all(conn)
    .await
}

/// Tag lists for a batch of post ids in one query. Posts without tags are
/// absent from the map; callers default to an empty list.
pub async fn find_for_posts(
    conn: &mut PgConnection,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<Tag>>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query(
        r#"
        SELECT pt.post_id, t.id, t.tag_name
        FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id = ANY($1)
        ORDER BY pt.post_id, t.id
        "#,
    )
    .bind(post_ids)
    .fetch_all(conn)
    .await?;

    let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in rows {
        let post_id: i64 = row.get("post_id");
        tags_by_post.entry(post_id).or_default().push(Tag {
            id: row.get("id"),
            name: row.get("tag_name"),
        });
    }

    Ok(tags_by_post)
}
