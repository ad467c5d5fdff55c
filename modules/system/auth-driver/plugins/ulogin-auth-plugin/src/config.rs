//! Configuration for the uLogin auth plugin.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides, e.g. `ULOGIN_SELF_REGISTRATION=true`.
pub const ENV_PREFIX: &str = "ULOGIN_";

/// Plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ULoginPluginConfig {
    /// Base URL of the uLogin service. `/token.php` is appended.
    pub provider_base_url: String,

    /// Create accounts for verified emails that are not known yet.
    pub self_registration: bool,

    /// Language of user-visible messages.
    pub language: String,

    /// Timeout of the provider call. `None` waits as long as the
    /// connection stays open.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ULoginPluginConfig {
    fn default() -> Self {
        Self {
            provider_base_url: "http://ulogin.ru".to_owned(),
            self_registration: false,
            language: "en".to_owned(),
            request_timeout_secs: None,
        }
    }
}

impl ULoginPluginConfig {
    /// Defaults, then the YAML file at `path` (if given), then `ULOGIN_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
