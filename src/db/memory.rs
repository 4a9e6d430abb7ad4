use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::Error,
    model::{Comment, Favorite, GenreStats, Manga, MangaUpdate, NewManga},
};

use super::{MangaFilter, Store, error::DatabaseError};

#[derive(Default)]
struct Tables {
    manga: Vec<Manga>,
    comments: Vec<Comment>,
    favorites: Vec<Favorite>,
    next_manga_id: i64,
    next_comment_id: i64,
    next_favorite_id: i64,
}

impl Tables {
    fn find_manga(&self, manga_id: i64) -> Option<&Manga> {
        self.manga.iter().find(|m| m.id == manga_id)
    }
}

/// Process-local store with the same contract as the Postgres one. Every
/// check-then-write happens under a single write lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_manga(&self, filter: &MangaFilter) -> Result<(Vec<Manga>, i64), Error> {
        let tables = self.tables.read().await;

        let matching: Vec<&Manga> = tables
            .manga
            .iter()
            .filter(|m| filter.genre.as_ref().is_none_or(|g| &m.genre == g))
            .collect();
        let total = matching.len() as i64;

        let page = matching
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn get_manga(&self, manga_id: i64) -> Result<Manga, Error> {
        self.tables
            .read()
            .await
            .find_manga(manga_id)
            .cloned()
            .ok_or(Error::Database(DatabaseError::NotFound))
    }

    async fn create_manga(&self, new_manga: &NewManga) -> Result<Manga, Error> {
        let mut tables = self.tables.write().await;
        tables.next_manga_id += 1;

        let manga = Manga {
            id: tables.next_manga_id,
            title: new_manga.title.clone(),
            description: new_manga.description.clone(),
            genre: new_manga.genre.clone(),
            cover: new_manga.cover().map(str::to_string),
        };
        tables.manga.push(manga.clone());

        Ok(manga)
    }

    async fn update_manga(&self, manga_id: i64, update: &MangaUpdate) -> Result<Manga, Error> {
        let mut tables = self.tables.write().await;
        let manga = tables
            .manga
            .iter_mut()
            .find(|m| m.id == manga_id)
            .ok_or(Error::Database(DatabaseError::NotFound))?;

        update.apply(manga);

        Ok(manga.clone())
    }

    async fn delete_manga(&self, manga_id: i64) -> Result<(), Error> {
        let mut tables = self.tables.write().await;
        let before = tables.manga.len();
        tables.manga.retain(|m| m.id != manga_id);

        if tables.manga.len() == before {
            return Err(Error::Database(DatabaseError::NotFound));
        }

        tables.comments.retain(|c| c.manga_id != manga_id);
        tables.favorites.retain(|f| f.manga_id != manga_id);

        Ok(())
    }

    async fn distinct_genres(&self) -> Result<Vec<String>, Error> {
        let tables = self.tables.read().await;
        let mut genres: Vec<String> = tables.manga.iter().map(|m| m.genre.clone()).collect();
        genres.sort();
        genres.dedup();

        Ok(genres)
    }

    async fn genre_counts(&self) -> Result<GenreStats, Error> {
        let tables = self.tables.read().await;
        let mut counts = GenreStats::new();
        for manga in &tables.manga {
            *counts.entry(manga.genre.clone()).or_insert(0) += 1;
        }

        Ok(counts)
    }

    async fn add_comment(
        &self,
        manga_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<Comment, Error> {
        let mut tables = self.tables.write().await;
        if tables.find_manga(manga_id).is_none() {
            return Err(Error::Database(DatabaseError::NotFound));
        }

        tables.next_comment_id += 1;
        let comment = Comment {
            id: tables.next_comment_id,
            manga_id,
            user_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());

        Ok(comment)
    }

    async fn list_comments(&self, manga_id: i64) -> Result<Vec<Comment>, Error> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.manga_id == manga_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(comments)
    }

    async fn add_favorite(&self, user_id: i64, manga_id: i64) -> Result<(), Error> {
        let mut tables = self.tables.write().await;
        if tables.find_manga(manga_id).is_none() {
            return Err(Error::Database(DatabaseError::NotFound));
        }

        if tables
            .favorites
            .iter()
            .any(|f| f.user_id == user_id && f.manga_id == manga_id)
        {
            return Err(Error::Database(DatabaseError::Conflict));
        }

        tables.next_favorite_id += 1;
        let id = tables.next_favorite_id;
        tables.favorites.push(Favorite {
            id,
            user_id,
            manga_id,
        });

        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, manga_id: i64) -> Result<(), Error> {
        self.tables
            .write()
            .await
            .favorites
            .retain(|f| !(f.user_id == user_id && f.manga_id == manga_id));

        Ok(())
    }

    async fn list_favorite_manga(&self, user_id: i64) -> Result<Vec<Manga>, Error> {
        let tables = self.tables.read().await;

        Ok(tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| tables.find_manga(f.manga_id).cloned())
            .collect())
    }
}
