//! Error types for translation registry lifecycle and catalog loading.
//!
//! Lookups never fail: a missing translation is answered with the source
//! text. The variants here cover misuse of the registry lifecycle and catalog
//! files that exist but cannot be read.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by the translation registry and catalog loader.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    /// A domain was registered before [`crate::TranslationRegistry::initialise`] ran.
    #[error("cannot register domain `{domain}` before the registry is initialised")]
    NotInitialised {
        /// Domain the caller attempted to register.
        domain: String,
    },

    /// The registry was initialised a second time.
    #[error("the translation registry is already initialised")]
    AlreadyInitialised,

    /// A subsystem that reads the locale on load was already active.
    #[error("`{name}` is already active; initialise translations before loading it")]
    SubsystemActive {
        /// Name reported by the subsystem probe.
        name: String,
    },

    /// A catalog file exists but could not be opened or parsed.
    #[error("cannot read catalog {path}: {reason}")]
    UnreadableCatalog {
        /// Location of the offending `.mo` file.
        path: Utf8PathBuf,
        /// Description of the I/O or parse failure.
        reason: String,
    },

    /// The configuration source could not be deserialised.
    #[error("invalid i18n configuration: {reason}")]
    InvalidConfig {
        /// Message reported by the TOML parser.
        reason: String,
    },
}

/// Convenience result alias for registry operations.
pub type Result<T> = std::result::Result<T, I18nError>;
