//! Mapping of client-side failures onto [`DataServiceError`]

use super::auth::AuthError;
use dataverse_application::DataServiceError;

impl From<AuthError> for DataServiceError {
    fn from(error: AuthError) -> Self {
        DataServiceError::Auth(error.to_string())
    }
}

/// Classify a reqwest failure (timeout, undecodable body, anything else).
pub(crate) fn from_reqwest(error: reqwest::Error) -> DataServiceError {
    if error.is_timeout() {
        DataServiceError::Timeout(error.to_string())
    } else if error.is_decode() {
        DataServiceError::Decode(error.to_string())
    } else {
        DataServiceError::Transport(error.to_string())
    }
}
