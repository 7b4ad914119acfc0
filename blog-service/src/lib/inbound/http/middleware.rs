use std::any::Any;
use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;

use super::handlers::ApiError;
use super::rate_limit::RateLimitDecision;
use crate::domain::access::errors::AuthError;
use crate::domain::access::identity::Identity;
use crate::inbound::http::router::AppState;

/// Reject requests from clients whose token bucket is empty.
pub async fn rate_limit(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(ConnectInfo(address)) = peer else {
        return Err(ApiError::InternalServerError(
            "peer address unavailable for rate limiting".to_string(),
        ));
    };

    match state.rate_limiter.check(address.ip()) {
        RateLimitDecision::Allowed => Ok(next.run(req).await),
        RateLimitDecision::Limited => {
            tracing::warn!(client_ip = %address.ip(), "Rate limit exceeded");
            Err(AuthError::RateLimited.into())
        }
    }
}

/// Resolve the `Authorization` header to an [`Identity`] and attach it to the
/// request. Every response leaving this stage varies on `Authorization`.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let mut response = match authorization_header(&req) {
        Ok(authorization) => match state
            .auth_service
            .resolve_identity(authorization.as_deref())
            .await
        {
            Ok(identity) => {
                tracing::debug!(anonymous = identity.is_anonymous(), "Request identity resolved");
                req.extensions_mut().insert(identity);
                next.run(req).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "Request authentication failed");
                ApiError::from(e).into_response()
            }
        },
        Err(e) => ApiError::from(e).into_response(),
    };

    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Authorization"));
    response
}

/// Header value as text. An empty header counts as absent.
fn authorization_header(req: &Request) -> Result<Option<String>, AuthError> {
    match req.headers().get(header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => match value.to_str() {
            Ok("") => Ok(None),
            Ok(text) => Ok(Some(text.to_string())),
            Err(_) => Err(AuthError::MalformedCredentialHeader),
        },
    }
}

/// Gate for routes that need a resolved user. Rejects anonymous requests and
/// exposes the user to downstream handlers as an extension.
pub async fn require_authenticated_user(
    Extension(identity): Extension<Identity>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = identity.require_authenticated()?.clone();
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Gate for routes that need an activated account. On success the user
/// is available to handlers as an extension.
pub async fn require_activated_user(
    Extension(identity): Extension<Identity>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = identity.require_activated()?.clone();
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Turn a handler panic into a 500 envelope and close the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    let mut response = ApiError::InternalServerError(format!("handler panicked: {detail}"))
        .into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
