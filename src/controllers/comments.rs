use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    auth::AuthUser,
    error::Error,
    model::{Comment, NewComment},
    state::SharedAppState,
};

use super::{MangaId, Payload};

#[tracing::instrument(name = "[GET] manga/{id}/comments", skip(app_state))]
pub async fn index(
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
) -> Result<Json<Vec<Comment>>, Error> {
    let comments = app_state.store.list_comments(manga_id).await?;

    Ok(Json(comments))
}

#[tracing::instrument(name = "[POST] manga/{id}/comments", skip(app_state, user, request), fields(user_id = user.user_id))]
pub async fn store(
    user: AuthUser,
    State(app_state): State<SharedAppState>,
    MangaId(manga_id): MangaId,
    Payload(request): Payload<NewComment>,
) -> Result<(StatusCode, Json<Comment>), Error> {
    request.validate().map_err(Error::Validation)?;

    let comment = app_state
        .store
        .add_comment(manga_id, user.user_id, &request.text)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
