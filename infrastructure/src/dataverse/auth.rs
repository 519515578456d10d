//! Bearer token acquisition
//!
//! The client never stores credentials itself; it asks a [`TokenSource`]
//! for an access token scoped to the data service and keeps the result
//! until it expires or `reauthenticate` is called.
//!
//! | Source | How the token is obtained |
//! |--------|---------------------------|
//! | [`AzureDeveloperCli`] | `azd auth token --output json --scope <root>/.default` |
//! | [`StaticToken`] | Fixed value, usually read from an environment variable |

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Errors raised while acquiring a token
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected token response: {0}")]
    Parse(String),

    #[error("Environment variable {0} is not set")]
    MissingEnv(String),
}

/// A bearer token and its expiry, when known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub secret: String,
    pub expires_on: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_on: None,
        }
    }

    pub fn expiring_at(mut self, expires_on: DateTime<Utc>) -> Self {
        self.expires_on = Some(expires_on);
        self
    }

    /// Whether the token is expired, or about to be, at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_on {
            Some(expires_on) => now + Duration::seconds(EXPIRY_SKEW_SECS) >= expires_on,
            None => false,
        }
    }
}

/// Source of bearer tokens for the data service
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Short name for logs and `config` output
    fn name(&self) -> &str;

    /// Acquire a token for `resource` (the scheme + host of the data service).
    async fn fetch_token(&self, resource: &str) -> Result<AccessToken, AuthError>;
}

/// A fixed token that never expires locally
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn from_env(var: &str) -> Result<Self, AuthError> {
        match std::env::var(var) {
            Ok(token) if !token.is_empty() => Ok(Self::new(token)),
            _ => Err(AuthError::MissingEnv(var.to_string())),
        }
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    fn name(&self) -> &str {
        "token"
    }

    async fn fetch_token(&self, _resource: &str) -> Result<AccessToken, AuthError> {
        Ok(AccessToken::new(self.token.clone()))
    }
}

/// Token obtained from the Azure Developer CLI login
pub struct AzureDeveloperCli {
    program: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzdTokenResponse {
    token: String,
    expires_on: Option<DateTime<Utc>>,
}

impl AzureDeveloperCli {
    pub fn new() -> Self {
        Self::with_program("azd")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn parse(stdout: &[u8]) -> Result<AccessToken, AuthError> {
        let response: AzdTokenResponse =
            serde_json::from_slice(stdout).map_err(|e| AuthError::Parse(e.to_string()))?;
        let token = AccessToken::new(response.token);
        Ok(match response.expires_on {
            Some(expires_on) => token.expiring_at(expires_on),
            None => token,
        })
    }
}

impl Default for AzureDeveloperCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenSource for AzureDeveloperCli {
    fn name(&self) -> &str {
        "azd"
    }

    async fn fetch_token(&self, resource: &str) -> Result<AccessToken, AuthError> {
        let scope = format!("{}/.default", resource.trim_end_matches('/'));
        debug!(program = %self.program, %scope, "Requesting access token");

        let output = Command::new(&self.program)
            .args(["auth", "token", "--output", "json", "--scope", &scope])
            .output()
            .await
            .map_err(|source| AuthError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AuthError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Self::parse(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_azd_response() {
        let stdout = br#"{"token":"eyJ0eXAi","expiresOn":"2026-03-01T10:00:00Z"}"#;
        let token = AzureDeveloperCli::parse(stdout).unwrap();

        assert_eq!(token.secret, "eyJ0eXAi");
        assert_eq!(
            token.expires_on,
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_azd_garbage() {
        assert!(matches!(
            AzureDeveloperCli::parse(b"not json"),
            Err(AuthError::Parse(_))
        ));
    }

    #[test]
    fn test_expiry_with_skew() {
        let expires = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        let token = AccessToken::new("t").expiring_at(expires);

        assert!(!token.is_expired_at(expires - Duration::minutes(5)));
        assert!(token.is_expired_at(expires - Duration::seconds(30)));
        assert!(token.is_expired_at(expires));
        assert!(!AccessToken::new("t").is_expired_at(expires));
    }

    #[tokio::test]
    async fn test_static_token() {
        let source = StaticToken::new("abc");
        let token = source.fetch_token("https://org.crm.dynamics.com").await.unwrap();
        assert_eq!(token, AccessToken::new("abc"));
    }

    #[test]
    fn test_static_token_missing_env() {
        let result = StaticToken::from_env("SALES_DATAVERSE_TEST_UNSET_TOKEN_VAR");
        assert!(matches!(result, Err(AuthError::MissingEnv(_))));
    }

    #[tokio::test]
    async fn test_azd_missing_program() {
        let source = AzureDeveloperCli::with_program("definitely-not-an-installed-azd");
        let err = source.fetch_token("https://org.crm.dynamics.com").await.unwrap_err();
        assert!(matches!(err, AuthError::Spawn { .. }));
    }
}
