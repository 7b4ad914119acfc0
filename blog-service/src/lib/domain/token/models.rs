use crate::domain::user::models::UserId;

/// Token owned by a user account.
pub type UserToken = auth::Token<UserId>;
