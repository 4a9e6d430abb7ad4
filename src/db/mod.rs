//! Persistence for manga, comments and favorites.
//!
//! Handlers only see the [`Store`] trait. [`postgres::PostgresStore`] backs
//! production; [`memory::MemoryStore`] keeps the same semantics in process
//! for tests and throwaway instances.

pub mod comment;
pub mod error;
pub mod favorite;
pub mod manga;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::Error,
    model::{Comment, GenreStats, Manga, MangaUpdate, NewManga},
};

#[derive(Debug, Clone, Default)]
pub struct MangaFilter {
    /// Exact match on `genre`.
    pub genre: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// One page of manga ordered by id, plus the number of rows matching the
    /// filter.
    async fn list_manga(&self, filter: &MangaFilter) -> Result<(Vec<Manga>, i64), Error>;

    async fn get_manga(&self, manga_id: i64) -> Result<Manga, Error>;

    async fn create_manga(&self, manga: &NewManga) -> Result<Manga, Error>;

    /// Fails with `NotFound` when the row is missing.
    async fn update_manga(&self, manga_id: i64, update: &MangaUpdate) -> Result<Manga, Error>;

    /// Removes the manga together with its comments and favorites.
    async fn delete_manga(&self, manga_id: i64) -> Result<(), Error>;

    async fn distinct_genres(&self) -> Result<Vec<String>, Error>;

    async fn genre_counts(&self) -> Result<GenreStats, Error>;

    /// Fails with `NotFound` when the manga does not exist.
    async fn add_comment(&self, manga_id: i64, user_id: i64, text: &str)
    -> Result<Comment, Error>;

    /// Newest first. An unknown manga yields an empty list.
    async fn list_comments(&self, manga_id: i64) -> Result<Vec<Comment>, Error>;

    /// Fails with `Conflict` when the pair is already stored.
    async fn add_favorite(&self, user_id: i64, manga_id: i64) -> Result<(), Error>;

    /// Not existence checked.
    async fn remove_favorite(&self, user_id: i64, manga_id: i64) -> Result<(), Error>;

    /// Manga favorited by the user in the order they were added. Favorites
    /// whose manga is gone are skipped.
    async fn list_favorite_manga(&self, user_id: i64) -> Result<Vec<Manga>, Error>;
}
