use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::activate_user::activate_user;
use super::handlers::create_token::create_activation_token;
use super::handlers::create_token::create_authentication_token;
use super::handlers::delete_tokens::delete_authentication_tokens;
use super::handlers::get_current_user::get_current_user;
use super::handlers::healthcheck::healthcheck;
use super::handlers::not_found;
use super::handlers::register_user::register_user;
use super::middleware::authenticate;
use super::middleware::handle_panic;
use super::middleware::rate_limit;
use super::middleware::require_activated_user;
use super::middleware::require_authenticated_user;
use super::rate_limit::RateLimiter;
use crate::domain::access::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub rate_limiter: RateLimiter,
    pub environment: String,
}

/// Build the HTTP application.
///
/// Every request passes, outermost first: tracing, panic recovery, CORS,
/// per-client rate limiting, then identity resolution. Gates sit on the
/// individual routes that need them.
pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    rate_limiter: RateLimiter,
    environment: String,
) -> Router {
    let state = AppState {
        auth_service,
        rate_limiter,
        environment,
    };

    let public_routes = Router::new()
        .route("/api/v1/healthcheck", get(healthcheck))
        .route("/api/v1/users", post(register_user))
        .route("/api/v1/users/activated", put(activate_user))
        .route(
            "/api/v1/tokens/authentication",
            post(create_authentication_token),
        )
        .route("/api/v1/tokens/activation", post(create_activation_token));

    let authenticated_routes = Router::new()
        .route(
            "/api/v1/tokens/authentication",
            delete(delete_authentication_tokens),
        )
        .route_layer(middleware::from_fn(require_authenticated_user));

    let activated_routes = Router::new()
        .route("/api/v1/users/me", get(get_current_user))
        .route_layer(middleware::from_fn(require_activated_user));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(activated_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .with_state(state)
}
