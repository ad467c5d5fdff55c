//! Auth Driver SDK
//!
//! This crate provides the public API shared by auth drivers and their host:
//!
//! - [`AuthDriverClient`] - Public API trait for consumers
//! - [`AuthDriver`] / [`AuthUiDriver`] - Plugin API traits for implementations
//! - [`Plugin`] / [`PluginRegistrar`] - Plugin load hook and its registration surface
//! - [`UserStore`], [`ResourceStore`], [`Translator`], [`RegistrationPolicy`] - Host collaborators
//! - [`AuthDriverError`] / [`StoreError`] - Error types

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod ports;

// Re-export main types at crate root
pub use api::AuthDriverClient;
pub use error::{AuthDriverError, StoreError};
pub use models::{
    AssetSpec, AuthRequest, FormArea, FormRequest, FormSpec, Gender, ResourceHandle,
    SubmittedFields, UserAccount, WidgetKind, WidgetSpec,
};
pub use plugin_api::{AuthDriver, AuthUiDriver, Plugin, PluginRegistrar};
pub use ports::{RegistrationPolicy, ResourceStore, Translator, UserStore};
