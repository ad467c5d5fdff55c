//! Domain layer of the uLogin plugin.

pub mod client;
pub mod error;
pub mod ports;
pub mod profile;
pub mod reconcile;
pub mod service;
pub mod token;

pub use error::DomainError;
pub use ports::ProfileProvider;
pub use profile::ProviderProfile;
pub use service::{Service, ServiceDeps};
