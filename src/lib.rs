//! Localised text resolution for Quod Libet.
//!
//! The crate decides which languages the user prefers, finds and loads
//! compiled gettext catalogs for any number of translation domains, and
//! answers lookups with the translated text or the source text when no
//! translation exists. Counts in phrases are formatted with the digit
//! grouping of the user's numeric locale.
//!
//! Start with [`TranslationRegistry`]: create it from an [`I18nConfig`],
//! initialise it once, register the domains you need, then look strings up.

pub mod catalog;
pub mod config;
pub mod environment;
pub mod error;
pub mod language;
pub mod phrase;
pub mod registry;
pub mod search;
pub mod testing;

pub use catalog::{Catalog, EmptyCatalog, GettextCatalog, MessageLookup, Translations};
pub use config::I18nConfig;
pub use environment::{LocaleEnvironment, NativeLocale};
pub use error::{I18nError, Result};
pub use phrase::NumberFormat;
pub use registry::{InitRequest, NoActiveSubsystems, SubsystemProbe, TranslationRegistry};

/// Marks `message` for extraction without translating it.
///
/// String tables built at compile time use this so the extraction tools see
/// the messages; the actual lookup happens later through the registry.
///
/// ```
/// use quodlibet_i18n::mark;
///
/// const COLUMNS: [&str; 2] = [mark("Artist"), mark("Album")];
/// assert_eq!(COLUMNS, ["Artist", "Album"]);
/// ```
#[must_use]
pub const fn mark(message: &str) -> &str {
    message
}
