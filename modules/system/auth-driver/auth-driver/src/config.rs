//! Configuration for the auth driver host.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthDriverConfig {
    /// Driver used when the caller does not name one.
    pub default_driver: String,
}

impl Default for AuthDriverConfig {
    fn default() -> Self {
        Self {
            default_driver: "ulogin".to_owned(),
        }
    }
}
