use auth::validate_token_plaintext;
use auth::Validator;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

pub async fn activate_user(
    State(state): State<AppState>,
    Json(body): Json<ActivateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let mut validator = Validator::new();
    validate_token_plaintext(&mut validator, &body.token);
    if !validator.is_valid() {
        return Err(ApiError::FailedValidation(validator.into_errors()));
    }

    state
        .auth_service
        .activate_user(&body.token)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivateUserRequestBody {
    #[serde(default)]
    token: String,
}
