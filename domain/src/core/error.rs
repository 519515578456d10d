//! Domain error types

use thiserror::Error;

/// Domain-level errors, raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Either {} must be provided", .options.join(" or "))]
    MissingIdentifier { options: Vec<String> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn missing_identifier<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DomainError::MissingIdentifier {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}
