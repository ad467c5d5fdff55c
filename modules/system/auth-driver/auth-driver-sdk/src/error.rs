//! Error types for auth drivers.

use thiserror::Error;

/// Errors surfaced by auth drivers to their host.
#[derive(Debug, Error)]
pub enum AuthDriverError {
    /// Client input is missing or malformed.
    #[error("invalid input: {0}")]
    Input(String),

    /// The identity could not be established or the account may not be used.
    ///
    /// The message is meant to be shown to the end user.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The driver does not support the requested flow.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// No driver is registered under the requested name.
    #[error("auth driver '{0}' is not registered")]
    DriverNotFound(String),

    /// The identity provider could not be reached.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthDriverError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }
}

/// Errors reported by collaborator stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    /// The acting subject may not perform this write.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthDriverError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Forbidden(msg) => Self::Authentication(msg),
            StoreError::NotFound(msg) | StoreError::Conflict(msg) | StoreError::Internal(msg) => {
                Self::Internal(msg)
            }
        }
    }
}
