use crate::domain::access::errors::AuthError;
use crate::domain::user::models::User;

/// Who a request is acting as.
///
/// Requests without credentials are `Anonymous`; anything else has been
/// resolved through the token store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// The resolved user, or `AuthenticationRequired` for anonymous requests.
    pub fn require_authenticated(&self) -> Result<&User, AuthError> {
        match self {
            Identity::Anonymous => Err(AuthError::AuthenticationRequired),
            Identity::Authenticated(user) => Ok(user),
        }
    }

    /// Like [`Identity::require_authenticated`], additionally rejecting
    /// accounts that have not been activated.
    pub fn require_activated(&self) -> Result<&User, AuthError> {
        let user = self.require_authenticated()?;
        if !user.activated {
            return Err(AuthError::InactiveAccount);
        }
        Ok(user)
    }
}
