//! Domain errors for the uLogin plugin.

use auth_driver_sdk::{AuthDriverError, StoreError};
use thiserror::Error;

/// Internal domain errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no uLogin token received")]
    MissingToken,

    #[error("bad response status code from uLogin: {status}")]
    ProviderStatus { status: u16 },

    #[error("bad response from uLogin: '{error}'")]
    ProviderRejected { error: String },

    #[error("malformed response from uLogin: {reason}")]
    MalformedResponse { reason: String },

    #[error("email '{email}' is not verified by uLogin")]
    EmailNotVerified { email: String },

    #[error("uLogin is unreachable: {reason}")]
    ProviderUnreachable { reason: String },

    /// Unknown email and self-registration is off. Carries the localized message.
    #[error("{message}")]
    SignUpDisabled { message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::ProviderUnreachable {
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for AuthDriverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingToken => Self::Input(e.to_string()),
            DomainError::ProviderStatus { .. }
            | DomainError::ProviderRejected { .. }
            | DomainError::MalformedResponse { .. }
            | DomainError::EmailNotVerified { .. } => Self::Authentication(e.to_string()),
            DomainError::SignUpDisabled { message } => Self::Authentication(message),
            DomainError::ProviderUnreachable { reason } => Self::ServiceUnavailable(reason),
            DomainError::Config(reason) => Self::Internal(reason),
            DomainError::Store(inner) => inner.into(),
        }
    }
}
