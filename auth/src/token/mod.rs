pub mod codec;
pub mod errors;
pub mod scope;

pub use codec::hash_plaintext;
pub use codec::validate_token_plaintext;
pub use codec::Token;
pub use codec::TokenCodec;
pub use codec::PLAINTEXT_LENGTH;
pub use errors::TokenError;
pub use scope::TokenScope;
