//! uLogin auth plugin load hook.

use std::sync::Arc;

use auth_driver_sdk::{AssetSpec, Plugin, PluginRegistrar, ResourceStore, UserStore};
use tracing::{info, warn};

use crate::config::ULoginPluginConfig;
use crate::domain::{DomainError, Service, ServiceDeps};
use crate::infra::{LangCatalog, StaticRegistrationPolicy, ULoginClient, embedded_catalogs};
use crate::ui::{PACKAGE, ULoginUi, WIDGET_TEMPLATE};

/// Name of the client-side widget module.
const WIDGET_JS_MODULE: &str = "auth-ulogin-widget";

/// uLogin auth plugin.
///
/// Loading it registers:
/// - the `ulogin` auth driver and its UI driver
/// - the plugin translations
/// - the widget template package
/// - the widget JS module and translated script and style globs
pub struct ULoginPlugin {
    config: ULoginPluginConfig,
    service: Arc<Service>,
}

impl ULoginPlugin {
    /// Plugin over explicit collaborators.
    #[must_use]
    pub fn new(config: ULoginPluginConfig, deps: ServiceDeps) -> Self {
        Self {
            config,
            service: Arc::new(Service::new(deps)),
        }
    }

    /// Plugin talking to the configured provider, with the embedded
    /// translations and the configured registration policy.
    ///
    /// # Errors
    ///
    /// `Config` if the provider URL is empty or the translations do not parse.
    pub fn from_config(
        config: ULoginPluginConfig,
        users: Arc<dyn UserStore>,
        resources: Arc<dyn ResourceStore>,
    ) -> Result<Self, DomainError> {
        if config.provider_base_url.trim().is_empty() {
            return Err(DomainError::Config(
                "provider_base_url must not be empty".to_owned(),
            ));
        }

        let translator = LangCatalog::embedded(&config.language)?;
        let provider = ULoginClient::new(&config.provider_base_url, config.request_timeout());
        info!(
            token_url = provider.token_url(),
            self_registration = config.self_registration,
            language = %config.language,
            "Loaded uLogin plugin configuration"
        );

        let deps = ServiceDeps {
            provider: Arc::new(provider),
            users,
            resources,
            translator: Arc::new(translator),
            policy: Arc::new(StaticRegistrationPolicy::new(config.self_registration)),
        };
        Ok(Self::new(config, deps))
    }

    #[must_use]
    pub fn config(&self) -> &ULoginPluginConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    fn assets() -> Vec<AssetSpec> {
        let glob = format!("{PACKAGE}@**");
        vec![
            AssetSpec::JsModule {
                name: WIDGET_JS_MODULE.to_owned(),
                location: WIDGET_TEMPLATE.to_owned(),
            },
            AssetSpec::TranslatedJs { glob: glob.clone() },
            AssetSpec::TranslatedLess { glob },
        ]
    }
}

impl Plugin for ULoginPlugin {
    fn package(&self) -> &str {
        PACKAGE
    }

    fn init(&self, registrar: &mut dyn PluginRegistrar) -> anyhow::Result<()> {
        info!("Initializing ulogin_auth_plugin");

        let catalogs = embedded_catalogs()?;
        if !catalogs.contains_key(&self.config.language) {
            warn!(
                language = %self.config.language,
                "No uLogin translations for the configured language, falling back to English"
            );
        }

        registrar.register_auth_driver(self.service.clone());
        registrar.register_ui_driver(Arc::new(ULoginUi));
        registrar.register_lang_package(PACKAGE, catalogs);
        registrar.register_template_package(PACKAGE);
        registrar.register_asset_package(PACKAGE, Self::assets());

        info!("uLogin auth plugin initialized");
        Ok(())
    }
}
