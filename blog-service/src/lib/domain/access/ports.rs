use async_trait::async_trait;

use crate::domain::access::errors::AuthError;
use crate::domain::access::identity::Identity;
use crate::domain::access::models::IssueTokenCommand;
use crate::domain::access::models::RegisterUserCommand;
use crate::domain::token::models::UserToken;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for credential issuance and request identity resolution.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Resolve the value of an `Authorization` header to an identity.
    ///
    /// # Arguments
    /// * `authorization` - Header value, `None` when the header is absent
    ///
    /// # Returns
    /// `Identity::Anonymous` without a header, otherwise the token's owner
    ///
    /// # Errors
    /// * `MalformedCredentialHeader` - Header is not `Bearer <token>`
    /// * `InvalidAuthToken` - Token does not have the shape of an issued token
    /// * `InvalidCredentials` - No live authentication token matches
    /// * `Internal` - Token store failed
    async fn resolve_identity(&self, authorization: Option<&str>) -> Result<Identity, AuthError>;

    /// Create an account with a hashed password. New accounts start
    /// deactivated.
    ///
    /// # Errors
    /// * `FailedValidation` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue a token in the requested scope.
    ///
    /// # Returns
    /// Issued token; its plaintext is returned to the client once
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Hashing, randomness or storage failed
    async fn issue_token(&self, command: IssueTokenCommand) -> Result<UserToken, AuthError>;

    /// Activate the owner of an activation token and revoke all of their
    /// activation tokens.
    ///
    /// # Errors
    /// * `FailedValidation` - No live activation token matches
    /// * `Internal` - Storage failed
    async fn activate_user(&self, plaintext: &str) -> Result<User, AuthError>;

    /// Revoke every authentication token owned by `user_id`.
    ///
    /// # Errors
    /// * `Internal` - Storage failed
    async fn revoke_authentication_tokens(&self, user_id: &UserId) -> Result<(), AuthError>;
}
