use async_trait::async_trait;
use auth::TokenScope;
use chrono::Utc;
use mockall::mock;

use crate::domain::token::errors::TokenStoreError;
use crate::domain::token::models::UserToken;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn create(&self, user: User) -> Result<User, UserError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        async fn update(&self, user: User) -> Result<User, UserError>;
    }
}

mock! {
    pub TestTokenRepository {}

    #[async_trait]
    impl TokenRepository for TestTokenRepository {
        async fn insert(&self, token: &UserToken) -> Result<(), TokenStoreError>;
        async fn find_user_for_token(&self, scope: TokenScope, plaintext: &str) -> Result<User, TokenStoreError>;
        async fn delete_all_for_user(&self, scope: TokenScope, user_id: &UserId) -> Result<(), TokenStoreError>;
    }
}

pub fn sample_user(activated: bool) -> User {
    User {
        id: UserId::new(),
        email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
        password_hash: "$argon2id$test_hash".to_string(),
        activated,
        created_at: Utc::now(),
    }
}
