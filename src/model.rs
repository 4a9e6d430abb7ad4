use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manga {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub cover: Option<String>,
}

/// Payload for `POST /api/manga`. Missing fields deserialize as empty and are
/// rejected by validation.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct NewManga {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,

    #[serde(default)]
    pub cover: Option<String>,
}

impl NewManga {
    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref().filter(|c| !c.is_empty())
    }
}

/// Payload for `PUT /api/manga/{id}`. Absent and empty fields keep the
/// stored value.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct MangaUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub cover: Option<String>,
}

impl MangaUpdate {
    /// Drops empty strings so stores only see fields that change.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        MangaUpdate {
            title: keep(self.title),
            description: keep(self.description),
            genre: keep(self.genre),
            cover: keep(self.cover),
        }
    }

    pub fn apply(&self, manga: &mut Manga) {
        if let Some(title) = &self.title {
            manga.title = title.clone();
        }
        if let Some(description) = &self.description {
            manga.description = description.clone();
        }
        if let Some(genre) = &self.genre {
            manga.genre = genre.clone();
        }
        if let Some(cover) = &self.cover {
            manga.cover = Some(cover.clone());
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MangaPage {
    pub data: Vec<Manga>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

pub type GenreStats = BTreeMap<String, i64>;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub manga_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct NewComment {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub manga_id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserFavorites {
    pub user: String,
    pub favorites: Vec<Manga>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message {
            message: message.into(),
        }
    }
}
