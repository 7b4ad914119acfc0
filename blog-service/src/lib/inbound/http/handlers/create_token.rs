use auth::TokenScope;
use auth::Validator;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::access::models::IssueTokenCommand;
use crate::domain::token::models::UserToken;
use crate::domain::user::models::validate_email;
use crate::domain::user::models::validate_plaintext_password;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn create_authentication_token(
    State(state): State<AppState>,
    Json(body): Json<CreateTokenRequestBody>,
) -> Result<ApiSuccess<AuthenticationTokenResponseData>, ApiError> {
    let command = body.try_into_command(TokenScope::Authentication)?;

    state
        .auth_service
        .issue_token(command)
        .await
        .map_err(ApiError::from)
        .map(|ref token| {
            ApiSuccess::new(
                StatusCode::CREATED,
                AuthenticationTokenResponseData {
                    authentication_token: token.into(),
                },
            )
        })
}

pub async fn create_activation_token(
    State(state): State<AppState>,
    Json(body): Json<CreateTokenRequestBody>,
) -> Result<ApiSuccess<ActivationTokenResponseData>, ApiError> {
    let command = body.try_into_command(TokenScope::Activation)?;

    state
        .auth_service
        .issue_token(command)
        .await
        .map_err(ApiError::from)
        .map(|ref token| {
            ApiSuccess::new(
                StatusCode::CREATED,
                ActivationTokenResponseData {
                    activation_token: token.into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTokenRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl CreateTokenRequestBody {
    fn try_into_command(self, scope: TokenScope) -> Result<IssueTokenCommand, ApiError> {
        let mut validator = Validator::new();
        validate_email(&mut validator, &self.email);
        validate_plaintext_password(&mut validator, &self.password);
        if !validator.is_valid() {
            return Err(ApiError::FailedValidation(validator.into_errors()));
        }

        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(IssueTokenCommand::new(email, self.password, scope))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl From<&UserToken> for TokenData {
    fn from(token: &UserToken) -> Self {
        Self {
            token: token.plaintext.clone(),
            expiry: token.expiry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationTokenResponseData {
    pub authentication_token: TokenData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationTokenResponseData {
    pub activation_token: TokenData,
}
