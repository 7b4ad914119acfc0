pub mod token;
pub mod user;

pub use token::PostgresTokenRepository;
pub use user::PostgresUserRepository;

use std::future::Future;
use std::time::Duration;

/// Why a bounded store call did not produce a result.
#[derive(Debug)]
pub(crate) enum StoreCallError {
    Database(sqlx::Error),
    Timeout(Duration),
}

/// Run a store call under `limit`, failing instead of waiting past it.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StoreCallError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(StoreCallError::Database),
        Err(_) => Err(StoreCallError::Timeout(limit)),
    }
}
