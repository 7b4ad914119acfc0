use auth::FieldErrors;
use thiserror::Error;

use crate::domain::token::errors::TokenStoreError;
use crate::user::errors::UserError;

/// Every way request admission or credential handling can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header must use the form 'Bearer <token>'")]
    MalformedCredentialHeader,

    #[error("Invalid or missing authentication token")]
    InvalidAuthToken,

    #[error("Invalid authentication credentials")]
    InvalidCredentials,

    #[error("You must be authenticated to access this resource")]
    AuthenticationRequired,

    #[error("Your user account must be activated to access this resource")]
    InactiveAccount,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Validation failed")]
    FailedValidation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        AuthError::FailedValidation(errors)
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenStoreError> for AuthError {
    fn from(err: TokenStoreError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
