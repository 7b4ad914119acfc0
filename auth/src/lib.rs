//! Credential primitives shared by services
//!
//! Provides framework-free building blocks for opaque bearer tokens:
//! - Token generation, hashing and shape validation
//! - Password hashing (Argon2id)
//! - Field validation accumulator
//! - Credential verification coordinated with token issuance
//!
//! Persistence is left to the service: only [`Token::hash`] is meant to be
//! stored, and lookups hash the presented plaintext with [`hash_plaintext`].
//!
//! # Examples
//!
//! ## Issuing a token
//! ```
//! use auth::{hash_plaintext, TokenCodec, TokenScope};
//! use chrono::Duration;
//!
//! let token = TokenCodec::new()
//!     .issue("user123", Duration::hours(24), TokenScope::Authentication)
//!     .unwrap();
//! assert_eq!(token.hash, hash_plaintext(&token.plaintext));
//! ```
//!
//! ## Login flow
//! ```
//! use auth::{Authenticator, TokenScope};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new();
//! let hash = auth.hash_password("password123").unwrap();
//!
//! let token = auth
//!     .authenticate("password123", &hash, 7, Duration::hours(24), TokenScope::Authentication)
//!     .unwrap();
//! println!("Token: {}", token.plaintext);
//! ```
//!
//! ## Validating input
//! ```
//! use auth::{validate_token_plaintext, Validator};
//!
//! let mut v = Validator::new();
//! validate_token_plaintext(&mut v, "too-short");
//! assert!(!v.is_valid());
//! ```

pub mod authenticator;
pub mod password;
pub mod token;
pub mod validator;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::hash_plaintext;
pub use token::validate_token_plaintext;
pub use token::Token;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenScope;
pub use validator::FieldErrors;
pub use validator::Validator;
