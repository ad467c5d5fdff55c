//! Plugin API traits for auth driver implementations.
//!
//! A plugin provides an [`AuthDriver`] and usually an [`AuthUiDriver`] under
//! the same name, and registers both through a [`PluginRegistrar`] when it
//! is loaded.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use modkit_security::ActorSession;

use crate::error::AuthDriverError;
use crate::models::{AssetSpec, AuthRequest, FormRequest, FormSpec, UserAccount};

/// Authentication half of a driver.
#[async_trait]
pub trait AuthDriver: Send + Sync {
    /// Registry key of the driver.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Establish (and create if allowed) the account behind `request`.
    ///
    /// On success `session` is left switched to the returned account. On
    /// failure it is left as it was on entry.
    ///
    /// # Errors
    ///
    /// - `Input` if required fields are missing
    /// - `Authentication` if the identity cannot be established
    /// - `ServiceUnavailable` if the identity provider cannot be reached
    /// - `Internal` on collaborator failure
    async fn sign_up(
        &self,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, AuthDriverError>;

    /// Authenticate an existing account. Same contract as [`sign_up`](Self::sign_up).
    ///
    /// # Errors
    ///
    /// See [`sign_up`](Self::sign_up).
    async fn sign_in(
        &self,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, AuthDriverError>;

    /// Drop driver-side state for `account`.
    ///
    /// # Errors
    ///
    /// Drivers without sign-out state never fail.
    async fn sign_out(
        &self,
        session: &mut ActorSession,
        account: &UserAccount,
    ) -> Result<(), AuthDriverError>;
}

/// UI half of a driver: forms rendered by the host's UI layer.
pub trait AuthUiDriver: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error if the driver cannot build the form.
    fn sign_in_form(&self, request: &FormRequest) -> Result<FormSpec, AuthDriverError>;

    /// # Errors
    ///
    /// Returns an error if the driver cannot build the form.
    fn sign_up_form(&self, request: &FormRequest) -> Result<FormSpec, AuthDriverError>;

    /// # Errors
    ///
    /// `NotImplemented` for drivers without account restoration.
    fn restore_account_form(&self, request: &FormRequest) -> Result<FormSpec, AuthDriverError>;
}

/// Host-side registration surface used by plugin load hooks.
pub trait PluginRegistrar {
    fn register_auth_driver(&mut self, driver: Arc<dyn AuthDriver>);

    fn register_ui_driver(&mut self, driver: Arc<dyn AuthUiDriver>);

    /// Register translations of `package` as language -> key -> message.
    fn register_lang_package(
        &mut self,
        package: &str,
        catalogs: HashMap<String, HashMap<String, String>>,
    );

    fn register_template_package(&mut self, package: &str);

    fn register_asset_package(&mut self, package: &str, assets: Vec<AssetSpec>);
}

/// A loadable plugin.
///
/// `init` runs once when the host loads the plugin and performs all of its
/// registrations.
pub trait Plugin: Send + Sync {
    /// Package name used for translations, templates and assets.
    fn package(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error if the plugin cannot be set up.
    fn init(&self, registrar: &mut dyn PluginRegistrar) -> anyhow::Result<()>;
}
