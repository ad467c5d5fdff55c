//! Auth driver host module.

use std::sync::Arc;

use auth_driver_sdk::{AuthDriverClient, Plugin};
use tracing::{info, warn};

use crate::config::AuthDriverConfig;
use crate::domain::{AuthDriverLocalClient, DriverRegistry};

/// Auth driver host.
///
/// This module:
/// 1. Runs the load hook of every plugin against a fresh registry
/// 2. Freezes the registry
/// 3. Exposes an [`AuthDriverClient`] routing to drivers by name
pub struct AuthDriverModule {
    config: AuthDriverConfig,
    registry: Arc<DriverRegistry>,
    client: Arc<dyn AuthDriverClient>,
}

impl AuthDriverModule {
    /// Load `plugins` in order.
    ///
    /// # Errors
    ///
    /// Returns the first plugin `init` failure.
    #[tracing::instrument(skip_all, fields(default_driver = %config.default_driver))]
    pub fn init(config: AuthDriverConfig, plugins: &[&dyn Plugin]) -> anyhow::Result<Self> {
        info!(plugins = plugins.len(), "Initializing auth driver host");

        let mut registry = DriverRegistry::new();
        for plugin in plugins {
            plugin.init(&mut registry)?;
            info!(package = plugin.package(), "Loaded plugin");
        }

        if registry.auth_driver(&config.default_driver).is_err() {
            warn!(
                default_driver = %config.default_driver,
                available = ?registry.driver_names(),
                "Default auth driver is not registered"
            );
        }

        let registry = Arc::new(registry);
        let client: Arc<dyn AuthDriverClient> =
            Arc::new(AuthDriverLocalClient::new(registry.clone()));

        Ok(Self {
            config,
            registry,
            client,
        })
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn AuthDriverClient> {
        self.client.clone()
    }

    #[must_use]
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Driver used when the caller names none.
    #[must_use]
    pub fn default_driver(&self) -> &str {
        &self.config.default_driver
    }
}
