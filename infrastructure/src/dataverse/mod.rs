//! Data service adapter: authenticated OData client and token sources

pub mod auth;
pub mod client;
mod error;

pub use auth::{AccessToken, AuthError, AzureDeveloperCli, StaticToken, TokenSource};
pub use client::{DEFAULT_TIMEOUT, DataverseClient};

use crate::config::{AuthMethod, FileAuthConfig};
use std::sync::Arc;

/// Token source selected by the `[auth]` section.
pub fn token_source(auth: &FileAuthConfig) -> Result<Arc<dyn TokenSource>, AuthError> {
    match auth.method {
        AuthMethod::Azd => Ok(Arc::new(AzureDeveloperCli::with_program(&auth.azd_program))),
        AuthMethod::Token => Ok(Arc::new(StaticToken::from_env(&auth.token_env)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_source_selection() {
        let azd = token_source(&FileAuthConfig::default()).unwrap();
        assert_eq!(azd.name(), "azd");

        let missing = FileAuthConfig {
            method: AuthMethod::Token,
            token_env: "SALES_DATAVERSE_TEST_UNSET_TOKEN".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            token_source(&missing),
            Err(AuthError::MissingEnv(_))
        ));
    }
}
