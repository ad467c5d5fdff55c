//! Domain layer for the auth driver host.

pub mod error;
pub mod local_client;
pub mod registry;

pub use error::DomainError;
pub use local_client::AuthDriverLocalClient;
pub use registry::DriverRegistry;
