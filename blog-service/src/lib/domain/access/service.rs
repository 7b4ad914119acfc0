use std::sync::Arc;

use async_trait::async_trait;
use auth::validate_token_plaintext;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenScope;
use auth::Validator;
use chrono::Utc;

use crate::domain::access::errors::AuthError;
use crate::domain::access::identity::Identity;
use crate::domain::access::models::IssueTokenCommand;
use crate::domain::access::models::RegisterUserCommand;
use crate::domain::access::models::TokenLifetimes;
use crate::domain::access::ports::AuthServicePort;
use crate::domain::token::errors::TokenStoreError;
use crate::domain::token::models::UserToken;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Domain service for token issuance and identity resolution.
pub struct AuthService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    authenticator: Authenticator,
    lifetimes: TokenLifetimes,
}

impl<UR, TR> AuthService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `tokens` - Token persistence implementation
    /// * `lifetimes` - Lifetime of newly issued tokens per scope
    pub fn new(users: Arc<UR>, tokens: Arc<TR>, lifetimes: TokenLifetimes) -> Self {
        Self {
            users,
            tokens,
            authenticator: Authenticator::new(),
            lifetimes,
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedCredentialHeader),
    }
}

#[async_trait]
impl<UR, TR> AuthServicePort for AuthService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    async fn resolve_identity(&self, authorization: Option<&str>) -> Result<Identity, AuthError> {
        let Some(header) = authorization else {
            return Ok(Identity::Anonymous);
        };

        let plaintext = bearer_token(header)?;

        let mut validator = Validator::new();
        validate_token_plaintext(&mut validator, plaintext);
        if !validator.is_valid() {
            return Err(AuthError::InvalidAuthToken);
        }

        match self
            .tokens
            .find_user_for_token(TokenScope::Authentication, plaintext)
            .await
        {
            Ok(user) => Ok(Identity::Authenticated(user)),
            Err(TokenStoreError::NotFound) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(e.into()),
        }
    }

    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            activated: false,
            created_at: Utc::now(),
        };

        let user = self.users.create(user).await.map_err(|e| match e {
            UserError::EmailAlreadyExists(_) => AuthError::invalid_field(
                "email",
                "a user with this email address already exists",
            ),
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn issue_token(&self, command: IssueTokenCommand) -> Result<UserToken, AuthError> {
        let user = self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.id,
                self.lifetimes.for_scope(command.scope),
                command.scope,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                other => AuthError::Internal(other.to_string()),
            })?;

        self.tokens.insert(&token).await?;

        tracing::info!(
            user_id = %user.id,
            scope = %token.scope,
            expiry = %token.expiry,
            "Token issued"
        );

        Ok(token)
    }

    async fn activate_user(&self, plaintext: &str) -> Result<User, AuthError> {
        let mut user = match self
            .tokens
            .find_user_for_token(TokenScope::Activation, plaintext)
            .await
        {
            Ok(user) => user,
            Err(TokenStoreError::NotFound) => {
                return Err(AuthError::invalid_field(
                    "token",
                    "invalid or expired activation token",
                ))
            }
            Err(e) => return Err(e.into()),
        };

        user.activated = true;
        let user = self.users.update(user).await?;

        self.tokens
            .delete_all_for_user(TokenScope::Activation, &user.id)
            .await?;

        tracing::info!(user_id = %user.id, "User activated");

        Ok(user)
    }

    async fn revoke_authentication_tokens(&self, user_id: &UserId) -> Result<(), AuthError> {
        self.tokens
            .delete_all_for_user(TokenScope::Authentication, user_id)
            .await?;

        tracing::info!(user_id = %user_id, "Authentication tokens revoked");

        Ok(())
    }
}
