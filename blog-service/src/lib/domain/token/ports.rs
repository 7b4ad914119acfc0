use async_trait::async_trait;
use auth::TokenScope;

use crate::domain::token::errors::TokenStoreError;
use crate::domain::token::models::UserToken;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persistence for issued tokens. Only the hash of a token is ever stored.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Persist hash, owner, expiry and scope of an issued token.
    ///
    /// # Errors
    /// * `DuplicateKey` - A token with the same hash is already stored
    /// * `DatabaseError` - Database operation failed
    /// * `Timeout` - Call exceeded the store ceiling
    async fn insert(&self, token: &UserToken) -> Result<(), TokenStoreError>;

    /// Resolve a presented plaintext to its owner.
    ///
    /// The plaintext is hashed before querying. Only a record in `scope` whose
    /// expiry is still in the future matches.
    ///
    /// # Errors
    /// * `NotFound` - No live token in `scope` matches
    /// * `DatabaseError` - Database operation failed
    /// * `Timeout` - Call exceeded the store ceiling
    async fn find_user_for_token(
        &self,
        scope: TokenScope,
        plaintext: &str,
    ) -> Result<User, TokenStoreError>;

    /// Remove every token of `scope` owned by `user_id`. Removing none is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    /// * `Timeout` - Call exceeded the store ceiling
    async fn delete_all_for_user(
        &self,
        scope: TokenScope,
        user_id: &UserId,
    ) -> Result<(), TokenStoreError>;
}
