//! Adapters behind the domain ports and host collaborators.

pub mod lang;
pub mod memory;
pub mod policy;
pub mod provider;

pub use lang::{LangCatalog, embedded_catalogs};
pub use memory::{InMemoryResourceStore, InMemoryUserStore};
pub use policy::StaticRegistrationPolicy;
pub use provider::ULoginClient;
