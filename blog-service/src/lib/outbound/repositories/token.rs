use std::time::Duration;

use async_trait::async_trait;
use auth::hash_plaintext;
use auth::TokenScope;
use chrono::Utc;
use sqlx::PgPool;

use super::bounded;
use super::user::UserRow;
use super::StoreCallError;
use crate::domain::token::errors::TokenStoreError;
use crate::domain::token::models::UserToken;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

pub struct PostgresTokenRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

fn store_error(err: StoreCallError) -> TokenStoreError {
    match err {
        StoreCallError::Database(e) => match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => TokenStoreError::DuplicateKey,
            _ => TokenStoreError::DatabaseError(e.to_string()),
        },
        StoreCallError::Timeout(limit) => TokenStoreError::Timeout(limit),
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn insert(&self, token: &UserToken) -> Result<(), TokenStoreError> {
        bounded(
            self.query_timeout,
            sqlx::query(
                r#"
                INSERT INTO tokens (hash, user_id, expiry, scope)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&token.hash)
            .bind(token.user_id.0)
            .bind(token.expiry)
            .bind(token.scope.as_str())
            .execute(&self.pool),
        )
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find_user_for_token(
        &self,
        scope: TokenScope,
        plaintext: &str,
    ) -> Result<User, TokenStoreError> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT users.id, users.email, users.password_hash, users.activated, users.created_at
                FROM users
                INNER JOIN tokens ON users.id = tokens.user_id
                WHERE tokens.hash = $1
                AND tokens.scope = $2
                AND tokens.expiry > $3
                "#,
            )
            .bind(hash_plaintext(plaintext))
            .bind(scope.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool),
        )
        .await
        .map_err(store_error)?
        .ok_or(TokenStoreError::NotFound)?;

        User::try_from(row).map_err(|e| TokenStoreError::DatabaseError(e.to_string()))
    }

    async fn delete_all_for_user(
        &self,
        scope: TokenScope,
        user_id: &UserId,
    ) -> Result<(), TokenStoreError> {
        let result = bounded(
            self.query_timeout,
            sqlx::query(
                r#"
                DELETE FROM tokens
                WHERE scope = $1 AND user_id = $2
                "#,
            )
            .bind(scope.as_str())
            .bind(user_id.0)
            .execute(&self.pool),
        )
        .await
        .map_err(store_error)?;

        tracing::debug!(
            user_id = %user_id,
            scope = %scope,
            deleted = result.rows_affected(),
            "Tokens deleted"
        );

        Ok(())
    }
}
