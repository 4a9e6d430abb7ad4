use sqlx::PgPool;

use crate::{error::Error, model::Comment};

use super::error::DatabaseError;

/// The foreign key on `comments.manga_id` turns an unknown manga into
/// `DatabaseError::NotFound`.
#[tracing::instrument(name = "insert comment", skip(pool, text))]
pub async fn insert_comment(
    pool: &PgPool,
    manga_id: i64,
    user_id: i64,
    text: &str,
) -> Result<Comment, Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments
            (manga_id, user_id, text, created_at)
        VALUES
            ($1, $2, $3, $4)
        RETURNING id, manga_id, user_id, text, created_at;
    "#,
    )
    .bind(manga_id)
    .bind(user_id)
    .bind(text)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(comment)
}

#[tracing::instrument(name = "get comments by manga id", skip(pool))]
pub async fn get_comments_by_manga_id(pool: &PgPool, manga_id: i64) -> Result<Vec<Comment>, Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT
            id, manga_id, user_id, text, created_at
        FROM
            comments
        WHERE
            manga_id = $1
        ORDER BY created_at DESC, id DESC;
    "#,
    )
    .bind(manga_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(comments)
}
