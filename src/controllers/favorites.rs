use axum::{Json, extract::State, http::StatusCode};

use crate::{
    auth::AuthUser,
    error::Error,
    model::{Message, UserFavorites},
    state::SharedAppState,
};

use super::MangaId;

#[tracing::instrument(name = "[GET] favorites", skip_all, fields(user_id = user.user_id))]
pub async fn index(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
) -> Result<Json<UserFavorites>, Error> {
    let directory_user = app_state
        .users
        .get_user(user.user_id)
        .await
        .map_err(Error::UserDirectory)?;

    let favorites = app_state.store.list_favorite_manga(user.user_id).await?;

    Ok(Json(UserFavorites {
        user: directory_user.username,
        favorites,
    }))
}

#[tracing::instrument(name = "[POST] manga/{id}/favorite", skip(app_state, user), fields(user_id = user.user_id))]
pub async fn store(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
) -> Result<(StatusCode, Json<Message>), Error> {
    app_state.store.add_favorite(user.user_id, manga_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(Message::new("Manga added to favorites")),
    ))
}

#[tracing::instrument(name = "[DELETE] manga/{id}/favorite", skip(app_state, user), fields(user_id = user.user_id))]
pub async fn destroy(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
) -> Result<Json<Message>, Error> {
    app_state
        .store
        .remove_favorite(user.user_id, manga_id)
        .await?;

    Ok(Json(Message::new("Manga removed from favorites")))
}
