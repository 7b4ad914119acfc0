use std::fmt;

/// Purpose a token was minted for.
///
/// Scopes are disjoint: a token issued for one scope is never accepted for
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScope {
    Authentication,
    Activation,
}

impl TokenScope {
    /// Stable storage form of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Authentication => "authentication",
            TokenScope::Activation => "activation",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_storage_form() {
        assert_eq!(TokenScope::Authentication.as_str(), "authentication");
        assert_eq!(TokenScope::Activation.as_str(), "activation");
        assert_eq!(TokenScope::Activation.to_string(), "activation");
    }
}
