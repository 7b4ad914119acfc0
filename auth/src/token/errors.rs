use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Random source unavailable: {0}")]
    RandomSource(String),
}
