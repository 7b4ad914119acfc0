use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::bounded;
use super::StoreCallError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub activated: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            activated: row.activated,
            created_at: row.created_at,
        })
    }
}

fn write_error(err: StoreCallError, user: &User) -> UserError {
    match err {
        StoreCallError::Database(e) => {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        }
        StoreCallError::Timeout(limit) => UserError::Timeout(limit),
    }
}

fn read_error(err: StoreCallError) -> UserError {
    match err {
        StoreCallError::Database(e) => UserError::DatabaseError(e.to_string()),
        StoreCallError::Timeout(limit) => UserError::Timeout(limit),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        bounded(
            self.query_timeout,
            sqlx::query(
                r#"
                INSERT INTO users (id, email, password_hash, activated, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(user.id.0)
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(user.activated)
            .bind(user.created_at)
            .execute(&self.pool),
        )
        .await
        .map_err(|e| write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, email, password_hash, activated, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool),
        )
        .await
        .map_err(read_error)?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = bounded(
            self.query_timeout,
            sqlx::query(
                r#"
                UPDATE users
                SET email = $2, password_hash = $3, activated = $4
                WHERE id = $1
                "#,
            )
            .bind(user.id.0)
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(user.activated)
            .execute(&self.pool),
        )
        .await
        .map_err(|e| write_error(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }
}
