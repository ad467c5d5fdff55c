//! Registrations collected from loaded plugins.

use std::collections::HashMap;
use std::sync::Arc;

use auth_driver_sdk::{AssetSpec, AuthDriver, AuthUiDriver, PluginRegistrar};
use tracing::{info, warn};

use super::error::DomainError;

type LangCatalogs = HashMap<String, HashMap<String, String>>;

/// Drivers keyed by name plus the static registrations of their plugins.
///
/// Filled while plugins load, then shared read-only behind an `Arc`.
#[derive(Default)]
pub struct DriverRegistry {
    auth_drivers: HashMap<String, Arc<dyn AuthDriver>>,
    ui_drivers: HashMap<String, Arc<dyn AuthUiDriver>>,
    lang_packages: HashMap<String, LangCatalogs>,
    template_packages: Vec<String>,
    asset_packages: HashMap<String, Vec<AssetSpec>>,
}

impl DriverRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// `DriverNotFound` if nothing is registered under `name`.
    pub fn auth_driver(&self, name: &str) -> Result<Arc<dyn AuthDriver>, DomainError> {
        self.auth_drivers
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::DriverNotFound {
                name: name.to_owned(),
            })
    }

    /// # Errors
    ///
    /// `UiDriverNotFound` if nothing is registered under `name`.
    pub fn ui_driver(&self, name: &str) -> Result<Arc<dyn AuthUiDriver>, DomainError> {
        self.ui_drivers
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UiDriverNotFound {
                name: name.to_owned(),
            })
    }

    /// Registered auth driver names, sorted.
    #[must_use]
    pub fn driver_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.auth_drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Message for `key` of `package` in `lang`, if registered.
    #[must_use]
    pub fn translation(&self, package: &str, lang: &str, key: &str) -> Option<&str> {
        self.lang_packages
            .get(package)?
            .get(lang)?
            .get(key)
            .map(String::as_str)
    }

    #[must_use]
    pub fn has_template_package(&self, package: &str) -> bool {
        self.template_packages.iter().any(|p| p == package)
    }

    #[must_use]
    pub fn assets(&self, package: &str) -> &[AssetSpec] {
        self.asset_packages
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl PluginRegistrar for DriverRegistry {
    fn register_auth_driver(&mut self, driver: Arc<dyn AuthDriver>) {
        let name = driver.name().to_owned();
        if self.auth_drivers.insert(name.clone(), driver).is_some() {
            warn!(driver = %name, "auth driver re-registered, previous one replaced");
        } else {
            info!(driver = %name, "registered auth driver");
        }
    }

    fn register_ui_driver(&mut self, driver: Arc<dyn AuthUiDriver>) {
        let name = driver.name().to_owned();
        if self.ui_drivers.insert(name.clone(), driver).is_some() {
            warn!(driver = %name, "UI driver re-registered, previous one replaced");
        } else {
            info!(driver = %name, "registered UI driver");
        }
    }

    fn register_lang_package(&mut self, package: &str, catalogs: LangCatalogs) {
        info!(package, languages = catalogs.len(), "registered lang package");
        let entry = self.lang_packages.entry(package.to_owned()).or_default();
        for (lang, messages) in catalogs {
            entry.entry(lang).or_default().extend(messages);
        }
    }

    fn register_template_package(&mut self, package: &str) {
        if !self.has_template_package(package) {
            self.template_packages.push(package.to_owned());
        }
    }

    fn register_asset_package(&mut self, package: &str, assets: Vec<AssetSpec>) {
        info!(package, assets = assets.len(), "registered asset package");
        self.asset_packages
            .entry(package.to_owned())
            .or_default()
            .extend(assets);
    }
}
