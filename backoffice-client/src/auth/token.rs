//! TokenProvider trait and BearerToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// A bearer token with optional expiration.
///
/// Current deployments authenticate with an HttpOnly session cookie and
/// never attach a bearer header; this type exists for the legacy
/// token-based path and for service integrations that hold a long-lived
/// token.
#[derive(Debug, Clone)]
pub struct BearerToken {
    /// The token attached as `Authorization: Bearer <secret>`.
    secret: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    /// Creates a new token with just the secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: None,
        }
    }

    /// Creates a new token with an expiration time.
    pub fn with_expiry(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns the token secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }
}

/// Trait for providing bearer tokens to the admin client.
///
/// The client asks the provider before each request. Returning `None`
/// means cookie-only authentication: no bearer header is attached.
/// Implementations can cache, refresh, or read tokens from secure
/// storage as they see fit.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use backoffice_client::auth::{BearerToken, TokenProvider};
///
/// struct KeyringProvider;
///
/// #[async_trait]
/// impl TokenProvider for KeyringProvider {
///     async fn bearer_token(&self) -> Option<BearerToken> {
///         read_from_keyring().map(BearerToken::new)
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets the bearer token to attach, or `None` for cookie-only auth.
    async fn bearer_token(&self) -> Option<BearerToken>;
}

/// A token provider that always returns the same static token.
///
/// Useful for testing or long-lived service tokens.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: BearerToken,
}

impl StaticTokenProvider {
    /// Creates a new static provider with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            token: BearerToken::new(secret),
        }
    }

    /// Creates a new static provider from an existing token.
    pub fn from_token(token: BearerToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Option<BearerToken> {
        Some(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn expiry_is_optional() {
        let token = BearerToken::new("secret");
        assert!(!token.is_expired());

        let expired = BearerToken::with_expiry("secret", Utc::now() - Duration::minutes(5));
        assert!(expired.is_expired());

        let fresh = BearerToken::with_expiry("secret", Utc::now() + Duration::minutes(5));
        assert!(!fresh.is_expired());
    }
}
