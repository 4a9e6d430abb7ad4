use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use validator::Validate;

use crate::{
    auth::AuthUser,
    db::MangaFilter,
    error::Error,
    model::{Manga, MangaPage, MangaUpdate, Message, NewManga},
    state::SharedAppState,
};

use super::{MangaId, Payload};

const DEFAULT_LIMIT: i64 = 10;
const DEFAULT_PAGE: i64 = 1;

#[derive(serde::Deserialize, Debug, Validate)]
pub struct Pagination {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 1))]
    limit: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 1))]
    page: Option<i64>,

    #[serde(default)]
    genre: Option<String>,
}

#[tracing::instrument(name = "[GET] manga", skip_all)]
pub async fn index(
    State(app_state): State<SharedAppState>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<MangaPage>, Error> {
    let Query(pagination) =
        pagination.map_err(|_| Error::BadRequest("Invalid pagination parameters"))?;
    pagination
        .validate()
        .map_err(|_| Error::BadRequest("Invalid pagination parameters"))?;

    let limit = pagination.limit.unwrap_or(DEFAULT_LIMIT);
    let page = pagination.page.unwrap_or(DEFAULT_PAGE);

    // Pages past the last row are empty, so an overflowing offset saturates.
    let offset = (page - 1).checked_mul(limit).unwrap_or(i64::MAX);

    let filter = MangaFilter {
        genre: pagination.genre.filter(|g| !g.is_empty()),
        limit,
        offset,
    };

    let (data, total) = app_state.store.list_manga(&filter).await?;

    Ok(Json(MangaPage {
        data,
        page,
        limit,
        total,
    }))
}

#[tracing::instrument(name = "[GET] manga/{id}", skip(app_state))]
pub async fn show(
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
) -> Result<Json<Manga>, Error> {
    let result = app_state.store.get_manga(manga_id).await?;

    Ok(Json(result))
}

#[tracing::instrument(name = "[POST] manga", skip_all, fields(user_id = user.user_id))]
pub async fn store(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
    Payload(request): Payload<NewManga>,
) -> Result<(StatusCode, Json<Manga>), Error> {
    request.validate().map_err(Error::Validation)?;

    let manga = app_state.store.create_manga(&request).await?;
    tracing::info!(manga_id = manga.id, "Manga created");

    Ok((StatusCode::CREATED, Json(manga)))
}

#[tracing::instrument(name = "[PUT] manga/{id}", skip(app_state, user, request), fields(user_id = user.user_id))]
pub async fn update(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
    Payload(request): Payload<MangaUpdate>,
) -> Result<Json<Manga>, Error> {
    let manga = app_state
        .store
        .update_manga(manga_id, &request.normalized())
        .await?;

    Ok(Json(manga))
}

#[tracing::instrument(name = "[DELETE] manga/{id}", skip(app_state, user), fields(user_id = user.user_id))]
pub async fn destroy(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
) -> Result<Json<Message>, Error> {
    app_state.store.delete_manga(manga_id).await?;

    Ok(Json(Message::new("Manga deleted")))
}
