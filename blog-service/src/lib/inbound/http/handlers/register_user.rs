use auth::Validator;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::access::models::RegisterUserCommand;
use crate::domain::user::models::validate_email;
use crate::domain::user::models::validate_plaintext_password;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterUserRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let mut validator = Validator::new();
        validate_email(&mut validator, &self.email);
        validate_plaintext_password(&mut validator, &self.password);
        if !validator.is_valid() {
            return Err(ApiError::FailedValidation(validator.into_errors()));
        }

        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(RegisterUserCommand::new(email, self.password))
    }
}
