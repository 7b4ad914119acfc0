use auth::FieldErrors;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::access::errors::AuthError;
use crate::domain::user::models::User;

pub mod activate_user;
pub mod create_token;
pub mod delete_tokens;
pub mod get_current_user;
pub mod healthcheck;
pub mod register_user;

const INTERNAL_ERROR_MESSAGE: &str =
    "The server encountered a problem and could not process your request";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Unauthorized(String),
    /// 401 that also asks the client to present a bearer token.
    InvalidAuthenticationToken(String),
    Forbidden(String),
    TooManyRequests(String),
    FailedValidation(FieldErrors),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, data) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorData::new(INTERNAL_ERROR_MESSAGE),
                )
            }
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorData::new(msg))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorData::new(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiErrorData::new(msg)),
            ApiError::InvalidAuthenticationToken(msg) => {
                let mut response = (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiResponseBody::new_error(
                        StatusCode::UNAUTHORIZED,
                        ApiErrorData::new(msg),
                    )),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                return response;
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiErrorData::new(msg)),
            ApiError::TooManyRequests(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, ApiErrorData::new(msg))
            }
            ApiError::FailedValidation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorData {
                    message: "Validation failed".to_string(),
                    errors: Some(errors),
                },
            ),
        };

        (status, Json(ApiResponseBody::new_error(status, data))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedCredentialHeader | AuthError::InvalidAuthToken => {
                ApiError::InvalidAuthenticationToken(err.to_string())
            }
            AuthError::InvalidCredentials | AuthError::AuthenticationRequired => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InactiveAccount => ApiError::Forbidden(err.to_string()),
            AuthError::RateLimited => ApiError::TooManyRequests(err.to_string()),
            AuthError::FailedValidation(errors) => ApiError::FailedValidation(errors),
            AuthError::Internal(detail) => ApiError::InternalServerError(detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, data: ApiErrorData) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiErrorData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub activated: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            activated: user.activated,
            created_at: user.created_at,
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("The requested resource could not be found".to_string())
}
