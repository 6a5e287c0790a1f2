//! Token authentication collaborator.
//!
//! Auth is out of scope for the gateway itself: an external provider
//! issues opaque tokens, and the gateway only validates them. The trait
//! keeps the provider swappable; tests inject [`StaticTokenAuth`].

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::error::GatewayError;

/// Identifier of an authenticated user in the CRUD service's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(
    /// Raw numeric user id as stored by the CRUD service.
    pub i64,
);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates opaque bearer tokens issued by the external auth provider.
#[async_trait]
pub trait AuthProvider: Send + Sync + fmt::Debug {
    /// Resolves a token key to the user it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] for unknown tokens and
    /// [`GatewayError::DataAccess`] if the provider itself fails.
    async fn authenticate(&self, token: &str) -> Result<UserId, GatewayError>;
}

/// Extracts the token key from an `Authorization: Token <key>` header value.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] if the scheme is not `Token`
/// or the key is empty.
pub fn token_from_header(header: &str) -> Result<&str, GatewayError> {
    let key = header
        .strip_prefix("Token ")
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(GatewayError::Unauthorized)?;
    Ok(key)
}

/// Fixed token table, used by tests and local development.
#[derive(Debug, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenAuth {
    /// Creates a provider from `(token, user)` pairs.
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = (String, UserId)>) -> Self {
        Self {
            tokens: pairs.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, token: &str) -> Result<UserId, GatewayError> {
        self.tokens
            .get(token)
            .copied()
            .ok_or(GatewayError::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn token_header_parsing() {
        assert_eq!(token_from_header("Token abc123").ok(), Some("abc123"));
        assert!(token_from_header("Bearer abc123").is_err());
        assert!(token_from_header("Token ").is_err());
        assert!(token_from_header("abc123").is_err());
    }

    #[tokio::test]
    async fn static_auth_resolves_known_token() {
        let auth = StaticTokenAuth::new([("abc".to_string(), UserId(7))]);
        assert_eq!(auth.authenticate("abc").await.ok(), Some(UserId(7)));
    }

    #[tokio::test]
    async fn static_auth_rejects_unknown_token() {
        let auth = StaticTokenAuth::new([]);
        let result = auth.authenticate("nope").await;
        assert!(matches!(result, Err(GatewayError::Unauthorized)));
    }
}
