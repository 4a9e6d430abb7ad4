use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    config::Database,
    error::Error,
    model::{Comment, GenreStats, Manga, MangaUpdate, NewManga},
};

use super::{MangaFilter, Store, comment, error::DatabaseError, favorite, manga};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresStore { pool }
    }

    /// The pool connects on first use.
    pub fn connect_lazy(database: &Database) -> Self {
        let pool = PgPoolOptions::new()
            .min_connections(5)
            .max_connections(30)
            .connect_lazy_with(database.with_db());

        Self::new(pool)
    }

    pub async fn migrate(&self) -> Result<(), Error> {
        tracing::warn!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(DatabaseError::DatabaseError(e.into())))
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn list_manga(&self, filter: &MangaFilter) -> Result<(Vec<Manga>, i64), Error> {
        manga::get_manga_with_pagination(&self.pool, filter).await
    }

    async fn get_manga(&self, manga_id: i64) -> Result<Manga, Error> {
        manga::get_manga_by_id(&self.pool, manga_id).await
    }

    async fn create_manga(&self, new_manga: &NewManga) -> Result<Manga, Error> {
        manga::insert_manga(&self.pool, new_manga).await
    }

    async fn update_manga(&self, manga_id: i64, update: &MangaUpdate) -> Result<Manga, Error> {
        manga::update_manga(&self.pool, manga_id, update).await
    }

    async fn delete_manga(&self, manga_id: i64) -> Result<(), Error> {
        manga::delete_manga(&self.pool, manga_id).await
    }

    async fn distinct_genres(&self) -> Result<Vec<String>, Error> {
        manga::get_distinct_genres(&self.pool).await
    }

    async fn genre_counts(&self) -> Result<GenreStats, Error> {
        manga::get_genre_counts(&self.pool).await
    }

    async fn add_comment(
        &self,
        manga_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<Comment, Error> {
        comment::insert_comment(&self.pool, manga_id, user_id, text).await
    }

    async fn list_comments(&self, manga_id: i64) -> Result<Vec<Comment>, Error> {
        comment::get_comments_by_manga_id(&self.pool, manga_id).await
    }

    async fn add_favorite(&self, user_id: i64, manga_id: i64) -> Result<(), Error> {
        favorite::insert_favorite(&self.pool, user_id, manga_id).await
    }

    async fn remove_favorite(&self, user_id: i64, manga_id: i64) -> Result<(), Error> {
        favorite::delete_favorite(&self.pool, user_id, manga_id).await
    }

    async fn list_favorite_manga(&self, user_id: i64) -> Result<Vec<Manga>, Error> {
        favorite::get_favorite_manga(&self.pool, user_id).await
    }
}
