use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Error,
    model::{GenreStats, Manga, MangaUpdate, NewManga},
};

use super::{MangaFilter, error::DatabaseError};

fn push_genre_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, genre: &'a Option<String>) {
    if let Some(genre) = genre {
        builder.push(" WHERE genre = ").push_bind(genre);
    }
}

#[tracing::instrument(name = "get manga with pagination", skip_all, fields(genre = ?filter.genre, limit = filter.limit, offset = filter.offset))]
pub async fn get_manga_with_pagination(
    pool: &PgPool,
    filter: &MangaFilter,
) -> Result<(Vec<Manga>, i64), Error> {
    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM manga");
    push_genre_filter(&mut count_builder, &filter.genre);

    let total: i64 = count_builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::from)?;

    let mut manga_builder: QueryBuilder<Postgres> = QueryBuilder::new(
        r#"
        SELECT
            id, title, description, genre, cover
        FROM
            manga
    "#,
    );
    push_genre_filter(&mut manga_builder, &filter.genre);
    manga_builder
        .push(" ORDER BY id LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);

    let manga = manga_builder
        .build_query_as::<Manga>()
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::from)?;

    Ok((manga, total))
}

#[tracing::instrument(name = "get manga by id", skip(pool))]
pub async fn get_manga_by_id(pool: &PgPool, manga_id: i64) -> Result<Manga, Error> {
    sqlx::query_as::<_, Manga>(
        r#"
        SELECT
            id, title, description, genre, cover
        FROM
            manga
        WHERE
            id = $1;
    "#,
    )
    .bind(manga_id)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or(Error::Database(DatabaseError::NotFound))
}

#[tracing::instrument(name = "insert manga", skip_all, fields(title = %manga.title))]
pub async fn insert_manga(pool: &PgPool, manga: &NewManga) -> Result<Manga, Error> {
    let manga = sqlx::query_as::<_, Manga>(
        r#"
        INSERT INTO manga
            (title, description, genre, cover)
        VALUES
            ($1, $2, $3, $4)
        RETURNING id, title, description, genre, cover;
    "#,
    )
    .bind(&manga.title)
    .bind(&manga.description)
    .bind(&manga.genre)
    .bind(manga.cover())
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(manga)
}

#[tracing::instrument(name = "update manga", skip(pool, update))]
pub async fn update_manga(
    pool: &PgPool,
    manga_id: i64,
    update: &MangaUpdate,
) -> Result<Manga, Error> {
    sqlx::query_as::<_, Manga>(
        r#"
        UPDATE manga
        SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            genre = COALESCE($4, genre),
            cover = COALESCE($5, cover)
        WHERE
            id = $1
        RETURNING id, title, description, genre, cover;
    "#,
    )
    .bind(manga_id)
    .bind(&update.title)
    .bind(&update.description)
    .bind(&update.genre)
    .bind(&update.cover)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or(Error::Database(DatabaseError::NotFound))
}

#[tracing::instrument(name = "delete manga", skip(pool))]
pub async fn delete_manga(pool: &PgPool, manga_id: i64) -> Result<(), Error> {
    let result = sqlx::query("DELETE FROM manga WHERE id = $1;")
        .bind(manga_id)
        .execute(pool)
        .await
        .map_err(DatabaseError::from)?;

    if result.rows_affected() == 0 {
        return Err(Error::Database(DatabaseError::NotFound));
    }

    Ok(())
}

#[tracing::instrument(name = "get distinct genres", skip_all)]
pub async fn get_distinct_genres(pool: &PgPool) -> Result<Vec<String>, Error> {
    let genres = sqlx::query_scalar::<_, String>("SELECT DISTINCT genre FROM manga ORDER BY genre;")
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::from)?;

    Ok(genres)
}

#[tracing::instrument(name = "get genre counts", skip_all)]
pub async fn get_genre_counts(pool: &PgPool) -> Result<GenreStats, Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT
            genre, COUNT(*) AS count
        FROM
            manga
        GROUP BY
            genre;
    "#,
    )
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(rows.into_iter().collect())
}
