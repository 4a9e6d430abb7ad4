use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use secrecy::ExposeSecret;

use crate::{config::Jwt, error::Error};

use super::error::AuthError;

#[derive(serde::Deserialize, serde::Serialize, Debug)]
pub struct Claim {
    pub user_id: i64,
    #[serde(default)]
    pub role: String,
    pub exp: usize,
}

/// Identity resolved by `jwt_auth_middleware`, valid for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: String,
}

impl From<Claim> for AuthUser {
    fn from(claim: Claim) -> Self {
        AuthUser {
            user_id: claim.user_id,
            role: claim.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(Error::Auth(AuthError::Unauthenticated))
    }
}

pub fn encode_jwt(user_id: i64, role: &str, expire: Duration, jwt: &Jwt) -> Result<String, Error> {
    let claim = Claim {
        user_id,
        role: role.to_string(),
        exp: (Utc::now() + expire).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(jwt.secret.expose_secret().as_bytes()),
    )
    .map_err(|e| Error::Auth(AuthError::InvalidToken(e)))
}

pub fn decode_jwt(jwt_token: &str, jwt: &Jwt) -> Result<TokenData<Claim>, Error> {
    let mut validation = Validation::default();
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claim>(
        jwt_token,
        &DecodingKey::from_secret(jwt.secret.expose_secret().as_bytes()),
        &validation,
    )
    .map_err(|e| Error::Auth(AuthError::InvalidToken(e)))
}
