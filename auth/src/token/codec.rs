use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::TokenError;
use super::scope::TokenScope;
use crate::validator::Validator;

/// Number of random bytes behind every token.
const SECRET_LENGTH: usize = 16;

/// Length of the base32 (unpadded) encoding of the secret.
pub const PLAINTEXT_LENGTH: usize = 26;

/// Freshly issued opaque bearer token.
///
/// `plaintext` is handed to the client once and must never be stored;
/// `hash` is the only form that reaches persistence.
#[derive(Clone, PartialEq, Eq)]
pub struct Token<U> {
    pub plaintext: String,
    pub hash: Vec<u8>,
    pub user_id: U,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

impl<U: fmt::Debug> fmt::Debug for Token<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("plaintext", &"[redacted]")
            .field("user_id", &self.user_id)
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Generates token secrets and their storable digests.
pub struct TokenCodec;

impl TokenCodec {
    /// Create a new token codec.
    pub fn new() -> Self {
        Self
    }

    /// Issue a new token for `user_id`, valid for `ttl` within `scope`.
    ///
    /// # Arguments
    /// * `user_id` - Owning user reference
    /// * `ttl` - Lifetime measured from now
    /// * `scope` - Purpose the token may be used for
    ///
    /// # Returns
    /// Token carrying both plaintext and hash
    ///
    /// # Errors
    /// * `RandomSource` - The operating system RNG could not supply bytes
    pub fn issue<U>(
        &self,
        user_id: U,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<Token<U>, TokenError> {
        let mut secret = [0u8; SECRET_LENGTH];
        OsRng
            .try_fill_bytes(&mut secret)
            .map_err(|e| TokenError::RandomSource(e.to_string()))?;

        let plaintext = base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &secret);
        let hash = hash_plaintext(&plaintext);

        Ok(Token {
            plaintext,
            hash,
            user_id,
            expiry: Utc::now() + ttl,
            scope,
        })
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 digest of a token plaintext, as stored and looked up.
pub fn hash_plaintext(plaintext: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hasher.finalize().to_vec()
}

/// Check that a presented plaintext has the shape of an issued token.
pub fn validate_token_plaintext(validator: &mut Validator, plaintext: &str) {
    validator.check(!plaintext.is_empty(), "token", "must be provided");
    validator.check(
        plaintext.len() == PLAINTEXT_LENGTH,
        "token",
        "must be 26 bytes long",
    );
}
