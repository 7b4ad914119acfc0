use auth::TokenScope;
use chrono::Duration;

use crate::config::TokenConfig;
use crate::domain::user::models::EmailAddress;

/// Validated request for a scoped token in exchange for credentials.
#[derive(Debug)]
pub struct IssueTokenCommand {
    pub email: EmailAddress,
    pub password: String,
    pub scope: TokenScope,
}

impl IssueTokenCommand {
    pub fn new(email: EmailAddress, password: String, scope: TokenScope) -> Self {
        Self {
            email,
            password,
            scope,
        }
    }
}

/// Validated request to create a new, not yet activated account.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// How long freshly issued tokens stay valid, per scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub authentication: Duration,
    pub activation: Duration,
}

impl TokenLifetimes {
    pub fn for_scope(&self, scope: TokenScope) -> Duration {
        match scope {
            TokenScope::Authentication => self.authentication,
            TokenScope::Activation => self.activation,
        }
    }
}

impl From<&TokenConfig> for TokenLifetimes {
    fn from(config: &TokenConfig) -> Self {
        Self {
            authentication: Duration::hours(config.authentication_ttl_hours),
            activation: Duration::hours(config.activation_ttl_hours),
        }
    }
}
