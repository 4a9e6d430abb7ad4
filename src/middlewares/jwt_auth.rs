use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    auth::{AuthUser, decode_jwt, error::AuthError},
    error::Error,
    state::SharedAppState,
};

#[tracing::instrument(name = "[MIDDLEWARE] jwt auth", skip_all, fields(user_id, role))]
pub async fn jwt_auth_middleware(
    State(app_state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let auth_header = match req.headers().get(axum::http::header::AUTHORIZATION) {
        Some(header) => header
            .to_str()
            .map_err(|_| Error::Auth(AuthError::MalformedHeader))?,
        None => {
            return Err(Error::Auth(AuthError::TokenMissing));
        }
    };

    let mut header = auth_header.split_whitespace();
    let (bearer_option, token_option) = (header.next(), header.next());

    let bearer = match bearer_option {
        Some(value) => value.to_lowercase(),
        None => {
            return Err(Error::Auth(AuthError::MalformedHeader));
        }
    };

    if bearer != *"bearer" {
        return Err(Error::Auth(AuthError::MalformedHeader));
    }

    let token = match token_option {
        Some(value) => value,
        None => {
            return Err(Error::Auth(AuthError::MalformedHeader));
        }
    };

    if header.next().is_some() {
        return Err(Error::Auth(AuthError::MalformedHeader));
    }

    let token_data = decode_jwt(token, &app_state.config.jwt)?;
    let user = AuthUser::from(token_data.claims);
    tracing::Span::current()
        .record("user_id", user.user_id)
        .record("role", user.role.as_str());

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
