use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::ValidationErrors;

use crate::{auth::error::AuthError, client::ClientError, db::error::DatabaseError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Database error")]
    Database(DatabaseError),

    #[error("Auth error")]
    Auth(AuthError),

    #[error("Validation error")]
    Validation(ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("User directory error")]
    UserDirectory(ClientError),

    #[error("Other error: {0}")]
    Other(anyhow::Error),
}

impl From<DatabaseError> for Error {
    fn from(value: DatabaseError) -> Self {
        Self::Database(value)
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// First message attached to any field, in field name order.
fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "All fields are required".to_string())
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Database(database_error) => match database_error {
                DatabaseError::DatabaseError(error) => {
                    tracing::error!(err.msg = %error, err.details = ?error, "Database Error");

                    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
                }
                DatabaseError::NotFound => error_response(StatusCode::NOT_FOUND, "Manga not found"),
                DatabaseError::Conflict => {
                    error_response(StatusCode::CONFLICT, "Manga is already in favorites")
                }
            },
            Error::Auth(auth_error) => {
                tracing::info!(err.msg = %auth_error, "Unauthenticated request");

                error_response(StatusCode::UNAUTHORIZED, auth_error.to_string())
            }
            Error::Validation(validation_error) => {
                tracing::info!(err.msg = %validation_error, err.details = ?validation_error, "Validation Error");

                error_response(
                    StatusCode::BAD_REQUEST,
                    first_validation_message(&validation_error),
                )
            }
            Error::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            Error::UserDirectory(error) => {
                tracing::error!(err.msg = %error, err.details = ?error, "User Directory Error");

                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch user data",
                )
            }
            Error::Other(error) => {
                tracing::error!(err.msg = %error, err.details = ?error, "Other Error");

                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
