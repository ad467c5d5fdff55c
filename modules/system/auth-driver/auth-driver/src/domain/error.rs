//! Domain errors for the auth driver host.

use auth_driver_sdk::AuthDriverError;

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("no auth driver registered as '{name}'")]
    DriverNotFound { name: String },

    #[error("no UI driver registered as '{name}'")]
    UiDriverNotFound { name: String },

    #[error(transparent)]
    Driver(#[from] AuthDriverError),
}

impl From<DomainError> for AuthDriverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::DriverNotFound { name } | DomainError::UiDriverNotFound { name } => {
                Self::DriverNotFound(name)
            }
            DomainError::Driver(inner) => inner,
        }
    }
}
