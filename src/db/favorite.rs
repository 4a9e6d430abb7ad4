use futures::TryStreamExt;
use sqlx::PgPool;

use crate::{error::Error, model::Manga};

use super::error::DatabaseError;

/// Relies on `UNIQUE (user_id, manga_id)`: a duplicate surfaces as
/// `DatabaseError::Conflict`, an unknown manga as `DatabaseError::NotFound`.
#[tracing::instrument(name = "insert favorite", skip(pool))]
pub async fn insert_favorite(pool: &PgPool, user_id: i64, manga_id: i64) -> Result<(), Error> {
    sqlx::query(
        r#"
        INSERT INTO favorites
            (user_id, manga_id)
        VALUES
            ($1, $2);
    "#,
    )
    .bind(user_id)
    .bind(manga_id)
    .execute(pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(())
}

#[tracing::instrument(name = "delete favorite", skip(pool))]
pub async fn delete_favorite(pool: &PgPool, user_id: i64, manga_id: i64) -> Result<(), Error> {
    sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND manga_id = $2;")
        .bind(user_id)
        .bind(manga_id)
        .execute(pool)
        .await
        .map_err(DatabaseError::from)?;

    Ok(())
}

#[tracing::instrument(name = "get favorite manga", skip(pool))]
pub async fn get_favorite_manga(pool: &PgPool, user_id: i64) -> Result<Vec<Manga>, Error> {
    let mut manga_stream = sqlx::query_as::<_, Manga>(
        r#"
        SELECT
            manga.id, manga.title, manga.description, manga.genre, manga.cover
        FROM
            favorites
        INNER JOIN
            manga ON favorites.manga_id = manga.id
        WHERE
            favorites.user_id = $1
        ORDER BY favorites.id;
    "#,
    )
    .bind(user_id)
    .fetch(pool);

    let mut manga = Vec::new();
    while let Some(row) = manga_stream
        .try_next()
        .await
        .map_err(DatabaseError::from)?
    {
        manga.push(row);
    }

    Ok(manga)
}
