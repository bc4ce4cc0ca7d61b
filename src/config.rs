//! Registry configuration loaded from TOML.
//!
//! `I18nConfig` names the application's own translation domain, the system
//! locale directory searched when a domain has no local binding, and an
//! optional debug wrapper applied from the start. Values are deserialised
//! from TOML when present and fall back to the packaged defaults otherwise.

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::error::{I18nError, Result};

/// Domain used for the application's own strings.
pub const DEFAULT_DOMAIN: &str = "quodlibet";

/// Directory searched for catalogs of domains without a local binding.
pub const DEFAULT_SYSTEM_LOCALE_DIR: &str = "/usr/share/locale";

/// Configuration for a [`crate::TranslationRegistry`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Domain whose catalog backs the registry's lookup helpers.
    #[serde(default = "I18nConfig::default_domain")]
    pub domain: String,
    /// Root of the `<lang>/LC_MESSAGES/<domain>.mo` tree shipped by the
    /// system.
    #[serde(default = "I18nConfig::default_system_locale_dir")]
    pub system_locale_dir: Utf8PathBuf,
    /// Marker wrapped around every resolved string during development.
    ///
    /// Blank values are treated as absent so a templated `debug_text = ""`
    /// does not wrap everything in nothing.
    pub debug_text: Option<String>,
}

impl I18nConfig {
    fn default_domain() -> String {
        DEFAULT_DOMAIN.to_owned()
    }

    fn default_system_locale_dir() -> Utf8PathBuf {
        Utf8PathBuf::from(DEFAULT_SYSTEM_LOCALE_DIR)
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidConfig`] when the document is malformed or
    /// contains unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use quodlibet_i18n::I18nConfig;
    ///
    /// let config = I18nConfig::from_toml_str("domain = \"exfalso\"\n")?;
    /// assert_eq!(config.domain, "exfalso");
    /// # Ok::<(), quodlibet_i18n::I18nError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|error| I18nError::InvalidConfig {
            reason: error.to_string(),
        })
    }

    /// Returns the configured debug wrapper, ignoring blank values.
    #[must_use]
    pub fn debug_text(&self) -> Option<&str> {
        self.debug_text
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            domain: Self::default_domain(),
            system_locale_dir: Self::default_system_locale_dir(),
            debug_text: None,
        }
    }
}
