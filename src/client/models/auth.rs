//! Authentication models

use std::fmt;

use serde::Deserialize;

/// Client-credentials triple for one PingOne environment.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Environment ID (UUID of the PingOne environment)
    pub env_id: String,

    /// Worker application client ID
    pub client_id: String,

    /// Worker application client secret
    pub client_secret: String,
}

impl Credentials {
    pub fn new(
        env_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            env_id: env_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("env_id", &self.env_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by the token endpoint.
///
/// Not cached: every task acquires its own.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Body returned by `POST /{env}/as/token`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("env-1", "client-1", "super-secret");
        let rendered = format!("{:?}", creds);

        assert!(rendered.contains("env-1"));
        assert!(rendered.contains("client-1"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_access_token_bearer_header() {
        let token = AccessToken::new("abc.def");
        assert_eq!(token.bearer(), "Bearer abc.def");
        assert_eq!(format!("{:?}", token), "AccessToken(<redacted>)");
    }

    #[test]
    fn test_token_response_missing_field() {
        let parsed: TokenResponse = serde_json::from_str(r#"{"token_type":"Bearer"}"#).unwrap();
        assert!(parsed.access_token.is_none());
    }
}
