//! Translations shipped with the plugin.

use std::collections::HashMap;

use auth_driver_sdk::Translator;

use crate::domain::DomainError;

/// Language used when a message is missing in the configured one.
pub const FALLBACK_LANGUAGE: &str = "en";

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../../lang/en.yaml")),
    ("ru", include_str!("../../lang/ru.yaml")),
    ("uk", include_str!("../../lang/uk.yaml")),
];

type Messages = HashMap<String, String>;

/// Parse the embedded catalogs as language -> key -> message.
///
/// # Errors
///
/// `Config` if a catalog is not a flat YAML mapping of strings.
pub fn embedded_catalogs() -> Result<HashMap<String, Messages>, DomainError> {
    EMBEDDED
        .iter()
        .map(|(lang, source)| {
            serde_saphyr::from_str::<Messages>(source)
                .map(|messages| ((*lang).to_owned(), messages))
                .map_err(|e| DomainError::Config(format!("lang/{lang}.yaml: {e}")))
        })
        .collect()
}

/// Translator bound to one language.
#[derive(Debug, Clone)]
pub struct LangCatalog {
    language: String,
    catalogs: HashMap<String, Messages>,
}

impl LangCatalog {
    #[must_use]
    pub fn new(language: impl Into<String>, catalogs: HashMap<String, Messages>) -> Self {
        Self {
            language: language.into(),
            catalogs,
        }
    }

    /// Catalog over the embedded translations.
    ///
    /// # Errors
    ///
    /// See [`embedded_catalogs`].
    pub fn embedded(language: &str) -> Result<Self, DomainError> {
        Ok(Self::new(language, embedded_catalogs()?))
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs.get(lang)?.get(key).map(String::as_str)
    }
}

impl Translator for LangCatalog {
    fn translate(&self, key: &str) -> String {
        self.lookup(&self.language, key)
            .or_else(|| self.lookup(FALLBACK_LANGUAGE, key))
            .unwrap_or(key)
            .to_owned()
    }
}
