pub mod comments;
pub mod favorites;
pub mod genres;
pub mod home;
pub mod manga;

use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Positive numeric `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct MangaId(pub i64);

impl<S> FromRequestParts<S> for MangaId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) if id > 0 => Ok(MangaId(id)),
            _ => Err(Error::BadRequest("Invalid manga id")),
        }
    }
}

/// Request body accepted as either JSON or an urlencoded form, chosen by
/// `Content-Type`. Anything unparseable is a 400.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let result = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|e| e.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|e| e.body_text())
        };

        result.map(Payload).map_err(|rejection| {
            tracing::info!(%rejection, "Rejected request body");
            Error::BadRequest("Invalid request body")
        })
    }
}
