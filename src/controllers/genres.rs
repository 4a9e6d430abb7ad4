use axum::{Json, extract::State};

use crate::{error::Error, model::GenreStats, state::SharedAppState};

#[tracing::instrument(name = "[GET] genres", skip_all)]
pub async fn index(State(app_state): State<SharedAppState>) -> Result<Json<Vec<String>>, Error> {
    let genres = app_state.store.distinct_genres().await?;

    Ok(Json(genres))
}

#[tracing::instrument(name = "[GET] genres/stats", skip_all)]
pub async fn stats(State(app_state): State<SharedAppState>) -> Result<Json<GenreStats>, Error> {
    let counts = app_state.store.genre_counts().await?;

    Ok(Json(counts))
}
