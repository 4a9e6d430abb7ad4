#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    TokenMissing,
    #[error("Authorization header is malformed")]
    MalformedHeader,
    #[error("Invalid or expired token")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("Unauthenticated")]
    Unauthenticated,
}
