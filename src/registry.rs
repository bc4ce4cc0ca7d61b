//! The translation registry and its lifecycle.
//!
//! A registry is created from an [`I18nConfig`], initialised exactly once
//! (which settles the language preferences), and then accepts domain
//! registrations. Lookups go through `&self`, so once startup is over the
//! registry can be shared freely between threads.
//!
//! ```
//! use quodlibet_i18n::{I18nConfig, InitRequest, LocaleEnvironment, TranslationRegistry};
//!
//! let mut registry = TranslationRegistry::new(I18nConfig::default());
//! registry.initialise(InitRequest::new().environment(LocaleEnvironment::default()))?;
//! registry.register("quodlibet", None)?;
//!
//! assert_eq!(registry.ngettext("one song", "many songs", 5), "many songs");
//! # Ok::<(), quodlibet_i18n::I18nError>(())
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};

use crate::catalog::{Catalog, GettextCatalog, Translations};
use crate::config::I18nConfig;
use crate::environment::{LANG, LANGUAGE, LocaleEnvironment, NativeLocale};
use crate::error::{I18nError, Result};
use crate::language::{normalise_language_list, search_candidates};
use crate::phrase::{NumberFormat, numeric_phrase};
use crate::search::{available_languages, find_catalogs};

static UNREGISTERED: Translations = Translations::empty();

/// Reports subsystems that read the locale when they load.
///
/// Toolkits such as the GUI library or the media framework capture the
/// language at load time, so translations must be initialised first.
pub trait SubsystemProbe {
    /// Names of the locale-reading subsystems that are already active.
    fn active(&self) -> Vec<String>;
}

/// Probe reporting that nothing is active yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoActiveSubsystems;

impl SubsystemProbe for NoActiveSubsystems {
    fn active(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Parameters for [`TranslationRegistry::initialise`].
pub struct InitRequest<'a> {
    language: Option<&'a str>,
    environment: Option<LocaleEnvironment>,
    native: NativeLocale,
    probe: &'a dyn SubsystemProbe,
}

impl Default for InitRequest<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> InitRequest<'a> {
    /// Creates a request that reads the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: None,
            environment: None,
            native: NativeLocale::Posix,
            probe: &NoActiveSubsystems,
        }
    }

    /// Overrides the system-derived language preference.
    ///
    /// Accepts `ll_CC` names as well as BCP 47 tags such as `pt-BR`.
    #[must_use]
    pub fn language(mut self, language: Option<&'a str>) -> Self {
        self.language = language;
        self
    }

    /// Uses `environment` instead of the process environment.
    #[must_use]
    pub fn environment(mut self, environment: LocaleEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Supplies the platform's native locale settings.
    #[must_use]
    pub fn native(mut self, native: NativeLocale) -> Self {
        self.native = native;
        self
    }

    /// Supplies the probe consulted for already-active subsystems.
    #[must_use]
    pub fn probe(mut self, probe: &'a dyn SubsystemProbe) -> Self {
        self.probe = probe;
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Lifecycle {
    Created,
    Initialised,
}

/// Process-wide table of translation domains.
#[derive(Debug)]
pub struct TranslationRegistry {
    config: I18nConfig,
    lifecycle: Lifecycle,
    environment: LocaleEnvironment,
    number_format: NumberFormat,
    debug_text: Option<String>,
    bindings: HashMap<String, Utf8PathBuf>,
    translations: HashMap<String, Translations>,
}

impl TranslationRegistry {
    /// Creates a registry holding an empty catalog for the configured domain.
    #[must_use]
    pub fn new(config: I18nConfig) -> Self {
        let debug_text = config.debug_text().map(str::to_owned);
        let mut seed = Translations::default();
        seed.set_debug_text(debug_text.as_deref());

        let mut translations = HashMap::new();
        translations.insert(config.domain.clone(), seed);

        Self {
            config,
            lifecycle: Lifecycle::Created,
            environment: LocaleEnvironment::default(),
            number_format: NumberFormat::Ungrouped,
            debug_text,
            bindings: HashMap::new(),
            translations,
        }
    }

    /// Settles the language preferences used by later registrations.
    ///
    /// Native platform settings fill unset locale variables, English entries
    /// of `LANGUAGE` gain a "no translation" fallback, and the numeric locale
    /// is derived. An explicit language then replaces `LANGUAGE`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::AlreadyInitialised`] on a second call and
    /// [`I18nError::SubsystemActive`] if the probe reports a subsystem that
    /// has already read the locale.
    pub fn initialise(&mut self, request: InitRequest<'_>) -> Result<()> {
        if self.lifecycle == Lifecycle::Initialised {
            return Err(I18nError::AlreadyInitialised);
        }

        let mut environment = request
            .environment
            .unwrap_or_else(LocaleEnvironment::from_process);
        request.native.apply_defaults(&mut environment);
        environment.sanitise();

        debug!(target: "i18n::registry", "LANGUAGE: {:?}", environment.get(LANGUAGE));
        debug!(target: "i18n::registry", "LANG: {:?}", environment.get(LANG));

        let number_format = NumberFormat::for_locale(environment.numeric_locale());

        if let Some(name) = request.probe.active().into_iter().next() {
            return Err(I18nError::SubsystemActive { name });
        }

        if let Some(language) = request.language {
            let language = normalise_language_list(language);
            environment.set(LANGUAGE, &language);
            debug!(target: "i18n::registry", "LANGUAGE: {language:?}");
        }

        self.environment = environment;
        self.number_format = number_format;
        self.lifecycle = Lifecycle::Initialised;
        Ok(())
    }

    /// Whether [`Self::initialise`] has completed.
    #[must_use]
    pub fn is_initialised(&self) -> bool {
        self.lifecycle == Lifecycle::Initialised
    }

    /// The locale environment settled during initialisation.
    #[must_use]
    pub fn environment(&self) -> &LocaleEnvironment {
        &self.environment
    }

    /// Loads and stores the catalog for `domain`.
    ///
    /// An existing `directory` binds the domain to it for this and later
    /// registrations; otherwise a previous binding or the system locale
    /// directory is searched. When no catalog is found an empty one is
    /// stored, so lookups fall back to the source text. Any previous entry
    /// for `domain` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::NotInitialised`] before [`Self::initialise`].
    pub fn register(
        &mut self,
        domain: &str,
        directory: Option<&Utf8Path>,
    ) -> Result<&Translations> {
        if !self.is_initialised() {
            return Err(I18nError::NotInitialised {
                domain: domain.to_owned(),
            });
        }

        if let Some(directory) = directory.filter(|directory| directory.is_dir()) {
            debug!(
                target: "i18n::registry",
                "using local locale directory {directory}",
            );
            self.bindings.insert(domain.to_owned(), directory.to_owned());
        }

        let root = self.locale_dir(domain).to_owned();
        let candidates = search_candidates(&self.environment.message_languages());
        let catalog = load_layers(&root, domain, &candidates);
        match catalog.path() {
            Some(path) => debug!(target: "i18n::registry", "translations loaded: {path}"),
            None => debug!(target: "i18n::registry", "no translation found in {root}"),
        }

        let mut translations = Translations::new(catalog);
        translations.set_debug_text(self.debug_text.as_deref());
        let entry = self
            .translations
            .entry(domain.to_owned())
            .insert_entry(translations);
        Ok(entry.into_mut())
    }

    /// Directory searched for `domain`: its binding or the system directory.
    #[must_use]
    pub fn locale_dir(&self, domain: &str) -> &Utf8Path {
        self.bindings
            .get(domain)
            .map_or(self.config.system_locale_dir.as_path(), Utf8PathBuf::as_path)
    }

    /// Sets or clears the marker wrapped around every lookup result.
    pub fn set_debug_wrapper(&mut self, debug_text: Option<&str>) {
        self.debug_text = debug_text.map(str::to_owned);
        for translations in self.translations.values_mut() {
            translations.set_debug_text(debug_text);
        }
    }

    /// Lists languages with a catalog for `domain`, `C` first.
    #[must_use]
    pub fn available_languages(&self, domain: &str) -> Vec<String> {
        available_languages(self.locale_dir(domain), domain)
    }

    /// Returns the registered entry for `domain`.
    #[must_use]
    pub fn translations(&self, domain: &str) -> Option<&Translations> {
        self.translations.get(domain)
    }

    fn application(&self) -> &Translations {
        self.translations
            .get(&self.config.domain)
            .unwrap_or(&UNREGISTERED)
    }

    /// Translates `message` in the application's domain.
    #[must_use]
    pub fn gettext<'a>(&'a self, message: &'a str) -> Cow<'a, str> {
        self.application().gettext(message)
    }

    /// Translates `message` in `context` in the application's domain.
    #[must_use]
    pub fn pgettext<'a>(&'a self, context: &'a str, message: &'a str) -> Cow<'a, str> {
        self.application().pgettext(context, message)
    }

    /// Translates the form matching `count` in the application's domain.
    #[must_use]
    pub fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, count: u64) -> Cow<'a, str> {
        self.application().ngettext(singular, plural, count)
    }

    /// Translates the form matching `count` in `context` in the
    /// application's domain.
    #[must_use]
    pub fn npgettext<'a>(
        &'a self,
        context: &'a str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> Cow<'a, str> {
        self.application().npgettext(context, singular, plural, count)
    }

    /// Formats a count-bearing phrase in the application's domain.
    ///
    /// See [`crate::phrase::substitute_count`] for the placeholder rules.
    #[must_use]
    pub fn numeric_phrase(
        &self,
        singular: &str,
        plural: &str,
        count: u64,
        placeholder: Option<&str>,
    ) -> String {
        numeric_phrase(
            self.application(),
            self.number_format,
            singular,
            plural,
            count,
            placeholder,
        )
    }
}

fn load_layers(root: &Utf8Path, domain: &str, candidates: &[String]) -> Catalog {
    let mut loaded: Option<GettextCatalog> = None;

    for path in find_catalogs(root, domain, candidates) {
        match GettextCatalog::open(&path) {
            Ok(catalog) => match loaded.as_mut() {
                Some(primary) => primary.add_fallback(catalog),
                None => loaded = Some(catalog),
            },
            Err(error) => warn!(target: "i18n::registry", "skipping catalog: {error}"),
        }
    }

    loaded.map_or_else(Catalog::default, Catalog::from)
}
