//! Translation catalogs and the debug-wrapped entries the registry stores.
//!
//! Every lookup is total: when a catalog has no entry for a message the
//! source text comes back unchanged. Context-qualified messages are stored
//! under `context \u{4} message` keys, so a flat key/translation table is
//! enough for both kinds of lookup.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::iter;
use std::ptr;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{I18nError, Result};

/// Separator placed between a context and its message in catalog keys.
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// Lookup operations shared by every catalog implementation.
pub trait MessageLookup {
    /// Returns the translation of `message`, or `message` itself.
    fn lookup<'a>(&'a self, message: &'a str) -> &'a str;

    /// Selects the singular or plural form for `count` and translates it.
    ///
    /// Without a translation the chosen source form is returned, so the
    /// grammatical number stays correct.
    fn lookup_plural<'a>(&'a self, singular: &'a str, plural: &'a str, count: u64) -> &'a str;

    /// Translates `message` as used in `context`, falling back to `message`.
    fn lookup_context<'a>(&'a self, context: &'a str, message: &'a str) -> &'a str;

    /// Combines [`Self::lookup_context`] and [`Self::lookup_plural`].
    fn lookup_context_plural<'a>(
        &'a self,
        context: &'a str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> &'a str;
}

const fn source_form<'a>(singular: &'a str, plural: &'a str, count: u64) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Whether a layer answered with the caller's own text, which is how the
/// parsed catalogs report a missing entry.
fn is_source(translated: &str, source: &str) -> bool {
    ptr::eq(translated, source)
}

/// Catalog without any translations.
///
/// Its plural rule selects the plural form for every count except one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EmptyCatalog;

impl MessageLookup for EmptyCatalog {
    fn lookup<'a>(&'a self, message: &'a str) -> &'a str {
        message
    }

    fn lookup_plural<'a>(&'a self, singular: &'a str, plural: &'a str, count: u64) -> &'a str {
        source_form(singular, plural, count)
    }

    fn lookup_context<'a>(&'a self, _context: &'a str, message: &'a str) -> &'a str {
        message
    }

    fn lookup_context_plural<'a>(
        &'a self,
        _context: &'a str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> &'a str {
        source_form(singular, plural, count)
    }
}

struct Layer {
    path: Utf8PathBuf,
    catalog: gettext::Catalog,
}

impl fmt::Debug for Layer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Layer")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Catalog backed by one or more compiled `.mo` files.
///
/// The first file is the primary catalog; further files are consulted in
/// order when the primary has no entry for a message.
#[derive(Debug)]
pub struct GettextCatalog {
    primary: Layer,
    fallbacks: Vec<Layer>,
}

impl GettextCatalog {
    /// Opens and parses the `.mo` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnreadableCatalog`] when the file cannot be
    /// opened or is not a valid catalog.
    pub fn open(path: &Utf8Path) -> Result<Self> {
        let file = File::open(path).map_err(|error| I18nError::UnreadableCatalog {
            path: path.to_owned(),
            reason: error.to_string(),
        })?;
        Self::from_reader(path, BufReader::new(file))
    }

    /// Parses a catalog from `reader`, recording `path` as its origin.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnreadableCatalog`] when the data is not a valid
    /// catalog.
    pub fn from_reader(path: impl Into<Utf8PathBuf>, reader: impl Read) -> Result<Self> {
        let path = path.into();
        match gettext::Catalog::parse(reader) {
            Ok(catalog) => Ok(Self {
                primary: Layer { path, catalog },
                fallbacks: Vec::new(),
            }),
            Err(error) => Err(I18nError::UnreadableCatalog {
                path,
                reason: error.to_string(),
            }),
        }
    }

    /// Appends `fallback`'s files after this catalog's own.
    pub fn add_fallback(&mut self, fallback: Self) {
        self.fallbacks.push(fallback.primary);
        self.fallbacks.extend(fallback.fallbacks);
    }

    /// Path of the primary catalog file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.primary.path
    }

    /// Paths of every layered file, primary first.
    #[must_use]
    pub fn paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.layers().map(|layer| layer.path.as_path())
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> {
        iter::once(&self.primary).chain(&self.fallbacks)
    }
}

impl MessageLookup for GettextCatalog {
    fn lookup<'a>(&'a self, message: &'a str) -> &'a str {
        self.layers()
            .map(|layer| layer.catalog.gettext(message))
            .find(|translated| !is_source(translated, message))
            .unwrap_or(message)
    }

    fn lookup_plural<'a>(&'a self, singular: &'a str, plural: &'a str, count: u64) -> &'a str {
        self.layers()
            .map(|layer| layer.catalog.ngettext(singular, plural, count))
            .find(|translated| {
                !is_source(translated, singular) && !is_source(translated, plural)
            })
            .unwrap_or_else(|| source_form(singular, plural, count))
    }

    fn lookup_context<'a>(&'a self, context: &'a str, message: &'a str) -> &'a str {
        self.layers()
            .map(|layer| layer.catalog.pgettext(context, message))
            .find(|translated| !is_source(translated, message))
            .unwrap_or(message)
    }

    fn lookup_context_plural<'a>(
        &'a self,
        context: &'a str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> &'a str {
        self.layers()
            .map(|layer| layer.catalog.npgettext(context, singular, plural, count))
            .find(|translated| {
                !is_source(translated, singular) && !is_source(translated, plural)
            })
            .unwrap_or_else(|| source_form(singular, plural, count))
    }
}

/// A loaded catalog of either kind.
#[derive(Debug)]
pub enum Catalog {
    /// No translation data was found.
    Empty(EmptyCatalog),
    /// Translations parsed from `.mo` files.
    Gettext(GettextCatalog),
}

impl Catalog {
    /// Path of the primary catalog file, if one was loaded.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Empty(_) => None,
            Self::Gettext(catalog) => Some(catalog.path()),
        }
    }

    fn as_lookup(&self) -> &dyn MessageLookup {
        match self {
            Self::Empty(catalog) => catalog,
            Self::Gettext(catalog) => catalog,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::Empty(EmptyCatalog)
    }
}

impl From<GettextCatalog> for Catalog {
    fn from(catalog: GettextCatalog) -> Self {
        Self::Gettext(catalog)
    }
}

impl MessageLookup for Catalog {
    fn lookup<'a>(&'a self, message: &'a str) -> &'a str {
        self.as_lookup().lookup(message)
    }

    fn lookup_plural<'a>(&'a self, singular: &'a str, plural: &'a str, count: u64) -> &'a str {
        self.as_lookup().lookup_plural(singular, plural, count)
    }

    fn lookup_context<'a>(&'a self, context: &'a str, message: &'a str) -> &'a str {
        self.as_lookup().lookup_context(context, message)
    }

    fn lookup_context_plural<'a>(
        &'a self,
        context: &'a str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> &'a str {
        self.as_lookup()
            .lookup_context_plural(context, singular, plural, count)
    }
}

/// A registered catalog together with the registry's debug wrapper.
///
/// When a wrapper `D` is set every lookup returns `D + result + D`, which
/// makes strings that bypassed translation stand out in the interface.
#[derive(Debug, Default)]
pub struct Translations {
    catalog: Catalog,
    debug_text: Option<String>,
}

impl Translations {
    /// Wraps `catalog` without a debug marker.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            debug_text: None,
        }
    }

    /// Entry without translations or debug marker.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            catalog: Catalog::Empty(EmptyCatalog),
            debug_text: None,
        }
    }

    /// Returns the underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Path of the primary `.mo` file, if translations were found.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.catalog.path()
    }

    /// Current debug wrapper.
    #[must_use]
    pub fn debug_text(&self) -> Option<&str> {
        self.debug_text.as_deref()
    }

    /// Replaces the debug wrapper; `None` disables wrapping.
    pub fn set_debug_text(&mut self, debug_text: Option<&str>) {
        self.debug_text = debug_text.map(str::to_owned);
    }

    fn wrap<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match &self.debug_text {
            None => Cow::Borrowed(value),
            Some(marker) => Cow::Owned(format!("{marker}{value}{marker}")),
        }
    }

    /// Translates `message`.
    ///
    /// ```
    /// use quodlibet_i18n::catalog::Translations;
    ///
    /// let mut translations = Translations::default();
    /// assert_eq!(translations.gettext("Play"), "Play");
    ///
    /// translations.set_debug_text(Some("#"));
    /// assert_eq!(translations.gettext("Play"), "#Play#");
    /// ```
    #[must_use]
    pub fn gettext<'a>(&'a self, message: &'a str) -> Cow<'a, str> {
        self.wrap(self.catalog.lookup(message))
    }

    /// Translates the form of `singular`/`plural` matching `count`.
    #[must_use]
    pub fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, count: u64) -> Cow<'a, str> {
        self.wrap(self.catalog.lookup_plural(singular, plural, count))
    }

    /// Translates `message` in `context`.
    #[must_use]
    pub fn pgettext<'a>(&'a self, context: &'a str, message: &'a str) -> Cow<'a, str> {
        self.wrap(self.catalog.lookup_context(context, message))
    }

    /// Translates the form matching `count` in `context`.
    #[must_use]
    pub fn npgettext<'a>(
        &'a self,
        context: &'a str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> Cow<'a, str> {
        self.wrap(
            self.catalog
                .lookup_context_plural(context, singular, plural, count),
        )
    }
}
