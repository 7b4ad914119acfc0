use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

/// Log out everywhere: revoke every authentication token of the caller.
/// Mounted behind the authenticated-user gate, which supplies the `User`.
pub async fn delete_authentication_tokens(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<ApiSuccess<DeleteTokensResponseData>, ApiError> {
    state
        .auth_service
        .revoke_authentication_tokens(&user.id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteTokensResponseData {
                    message: "authentication tokens revoked".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTokensResponseData {
    pub message: String,
}
