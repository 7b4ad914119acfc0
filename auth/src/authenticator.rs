use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Token;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenScope;

/// Credential coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator with the default Argon2id hasher and token codec.
    pub fn new() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password and issue a scoped token on success.
    ///
    /// # Arguments
    /// * `password` - Plaintext password presented by the client
    /// * `stored_hash` - PHC hash on record for the user
    /// * `user_id` - Owner of the issued token
    /// * `ttl` - Token lifetime
    /// * `scope` - Purpose of the issued token
    ///
    /// # Returns
    /// Issued token; the caller persists it and returns the plaintext once
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash unusable
    /// * `TokenError` - Token generation failed
    pub fn authenticate<U>(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: U,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<Token<U>, AuthenticationError> {
        if !self.password_hasher.matches(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(user_id, ttl, scope)?)
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
