use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Method, Request, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{controllers, middlewares::jwt_auth_middleware, state::AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn init_router(app_state: AppState) -> Router {
    let state = Arc::new(app_state);

    let public_route = Router::new()
        .route("/manga", get(controllers::manga::index))
        .route("/manga/{id}", get(controllers::manga::show))
        .route("/manga/{id}/comments", get(controllers::comments::index))
        .route("/genres", get(controllers::genres::index))
        .route("/genres/stats", get(controllers::genres::stats));

    let protected_route = Router::new()
        .route("/manga", post(controllers::manga::store))
        .route(
            "/manga/{id}",
            axum::routing::put(controllers::manga::update).delete(controllers::manga::destroy),
        )
        .route("/manga/{id}/comments", post(controllers::comments::store))
        .route(
            "/manga/{id}/favorite",
            post(controllers::favorites::store).delete(controllers::favorites::destroy),
        )
        .route("/favorites", get(controllers::favorites::index))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    let cors = cors_layer(&state.config.application.cors_origins);
    let uploads = ServeDir::new(&state.config.application.uploads_dir);

    let x_request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_id_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|val| val.to_str().ok())
                    .unwrap_or("");
                let user_agent = request
                    .headers()
                    .get(header::USER_AGENT)
                    .and_then(|val| val.to_str().ok())
                    .unwrap_or("");

                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                tracing::info_span!(
                    "http_request",
                    request_id,
                    method = ?request.method(),
                    uri = ?request.uri(),
                    path = matched_path,
                    version = ?request.version(),
                    user_agent,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id_header));

    Router::new()
        .route("/", get(controllers::home::index))
        .nest("/api", public_route.merge(protected_route))
        .nest_service("/uploads", uploads)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(request_id_middleware)
        .layer(CatchPanicLayer::custom(panic_handler as fn(_) -> _))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn panic_handler(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
