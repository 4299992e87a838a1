use crate::models::Image;
use sqlx::PgConnection;

/// Store the image owned by a freshly created post
pub async fn insert_image(conn: &mut PgConnection, image: &Image) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO images (post_id, image_name, image_size, image_data)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(image.post_id)
    .bind(&image.name)
    .bind(image.size)
    .bind(&image.data)
    .execute(conn)
    .await?;

    Ok(())
}

/// Replace a post's image in place
pub async fn update_image(conn: &mut PgConnection, image: &Image) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE images
        SET image_name = $1, image_size = $2, image_data = $3
        WHERE post_id = $4
        "#,
    )
    .bind(&image.name)
    .bind(image.size)
    .bind(&image.data)
    .bind(image.post_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Find the image owned by a post
pub async fn find_by_post(
    conn: &mut PgConnection,
    post_id: i64,
) -> Result<Option<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(
        r#"
        SELECT post_id, image_name, image_size, image_data
        FROM images
        WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(conn)
    .await
}
