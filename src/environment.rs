//! Snapshot of the locale environment seen by the translation registry.
//!
//! The registry never writes to the process environment. It reads the locale
//! variables once into a [`LocaleEnvironment`], fills gaps from the platform's
//! native locale settings, and adjusts its own copy from then on.

use std::collections::BTreeMap;
use std::env;

use log::debug;

use crate::language::{bcp47_to_language, native_locale_to_lang, sanitise_language_list};

/// Priority list of message languages, colon separated.
pub const LANGUAGE: &str = "LANGUAGE";
/// Overrides every locale category.
pub const LC_ALL: &str = "LC_ALL";
/// Locale for user-facing messages.
pub const LC_MESSAGES: &str = "LC_MESSAGES";
/// Locale for number formatting.
pub const LC_NUMERIC: &str = "LC_NUMERIC";
/// Default locale for every category.
pub const LANG: &str = "LANG";

const LOCALE_VARIABLES: [&str; 5] = [LANGUAGE, LC_ALL, LC_MESSAGES, LC_NUMERIC, LANG];

/// Locale variables captured from the process or built by hand.
///
/// Empty values are treated as unset when deriving languages, which matches
/// how catalog lookup reads the real environment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocaleEnvironment {
    variables: BTreeMap<&'static str, String>,
}

impl LocaleEnvironment {
    /// Captures the locale variables of the current process.
    ///
    /// Values that are not valid Unicode are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        let variables = LOCALE_VARIABLES
            .into_iter()
            .filter_map(|name| {
                env::var_os(name)
                    .and_then(|value| value.into_string().ok())
                    .map(|value| (name, value))
            })
            .collect();
        Self { variables }
    }

    /// Returns a copy with `name` set to `value`.
    ///
    /// Unknown variable names are ignored.
    #[must_use]
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the raw value of a locale variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Sets a locale variable, replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(known) = LOCALE_VARIABLES.into_iter().find(|known| *known == name) {
            self.variables.insert(known, value.to_owned());
        }
    }

    /// Sets a locale variable only when it is not present yet.
    pub fn set_default(&mut self, name: &str, value: &str) {
        if self.get(name).is_none() {
            self.set(name, value);
        }
    }

    fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Appends the "no translation" marker after English `LANGUAGE` entries.
    pub fn sanitise(&mut self) {
        if let Some(list) = self.get(LANGUAGE) {
            let sanitised = sanitise_language_list(list);
            self.set(LANGUAGE, &sanitised);
        }
    }

    /// Returns the message language priority list.
    ///
    /// The first non-empty of `LANGUAGE`, `LC_ALL`, `LC_MESSAGES`, and `LANG`
    /// wins and is split on colons.
    #[must_use]
    pub fn message_languages(&self) -> Vec<&str> {
        [LANGUAGE, LC_ALL, LC_MESSAGES, LANG]
            .into_iter()
            .find_map(|name| self.non_empty(name))
            .map(|value| value.split(':').collect())
            .unwrap_or_default()
    }

    /// Returns the locale governing number formatting.
    ///
    /// `LC_ALL` takes precedence over `LC_NUMERIC`, which takes precedence
    /// over `LANG`.
    #[must_use]
    pub fn numeric_locale(&self) -> Option<&str> {
        [LC_ALL, LC_NUMERIC, LANG]
            .into_iter()
            .find_map(|name| self.non_empty(name))
    }
}

/// Locale settings reported by the operating system's native APIs.
///
/// Querying those APIs is left to the embedding application; the registry
/// only translates their answers into locale variables.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum NativeLocale {
    /// The locale variables are authoritative.
    #[default]
    Posix,
    /// Windows user and system UI languages, already in `ll_CC` form.
    Windows {
        /// UI languages in priority order.
        ui_languages: Vec<String>,
    },
    /// macOS `NSLocale` settings.
    MacOs {
        /// Current locale identifier, such as `zh-Hans_TW`.
        identifier: String,
        /// Preferred languages as BCP 47 tags, in priority order.
        preferred_languages: Vec<String>,
    },
}

impl NativeLocale {
    /// Fills `LANG` and `LANGUAGE` from the native settings when unset.
    pub fn apply_defaults(&self, environment: &mut LocaleEnvironment) {
        match self {
            Self::Posix => {}
            Self::Windows { ui_languages } => {
                let languages: Vec<&str> = ui_languages
                    .iter()
                    .map(String::as_str)
                    .filter(|language| !language.is_empty())
                    .collect();
                if let Some(first) = languages.first() {
                    environment.set_default(LANG, first);
                    environment.set_default(LANGUAGE, &languages.join(":"));
                }
            }
            Self::MacOs {
                identifier,
                preferred_languages,
            } => {
                environment.set_default(LANG, &native_locale_to_lang(identifier));
                if !preferred_languages.is_empty() {
                    let converted: Vec<String> = preferred_languages
                        .iter()
                        .map(|tag| bcp47_to_language(tag))
                        .collect();
                    environment.set_default(LANGUAGE, &converted.join(":"));
                }
            }
        }

        debug!(
            target: "i18n::environment",
            "native locale defaults applied: LANG={:?} LANGUAGE={:?}",
            environment.get(LANG),
            environment.get(LANGUAGE),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn language_takes_priority_over_lang() {
        let environment = LocaleEnvironment::default()
            .with_var(LANG, "fr_FR.UTF-8")
            .with_var(LANGUAGE, "de:en");

        assert_eq!(environment.message_languages(), ["de", "en"]);
    }

    #[rstest]
    fn empty_values_fall_through() {
        let environment = LocaleEnvironment::default()
            .with_var(LANGUAGE, "")
            .with_var(LC_MESSAGES, "pl_PL");

        assert_eq!(environment.message_languages(), ["pl_PL"]);
    }

    #[rstest]
    fn no_variables_yield_no_languages() {
        assert!(LocaleEnvironment::default().message_languages().is_empty());
    }

    #[rstest]
    #[case(&[(LANG, "de_DE.UTF-8")], Some("de_DE.UTF-8"))]
    #[case(&[(LANG, "de_DE"), (LC_NUMERIC, "en_US")], Some("en_US"))]
    #[case(&[(LC_NUMERIC, "en_US"), (LC_ALL, "C")], Some("C"))]
    #[case(&[(LANGUAGE, "fr")], None)]
    fn numeric_locale_follows_category_precedence(
        #[case] variables: &[(&str, &str)],
        #[case] expected: Option<&str>,
    ) {
        let environment = variables
            .iter()
            .fold(LocaleEnvironment::default(), |environment, (name, value)| {
                environment.with_var(name, value)
            });

        assert_eq!(environment.numeric_locale(), expected);
    }

    #[rstest]
    fn sanitise_rewrites_language_only() {
        let mut environment = LocaleEnvironment::default()
            .with_var(LANGUAGE, "de:en_GB:fr")
            .with_var(LANG, "en_US");

        environment.sanitise();

        assert_eq!(environment.get(LANGUAGE), Some("de:en_GB:C:fr"));
        assert_eq!(environment.get(LANG), Some("en_US"));
    }

    #[rstest]
    fn unknown_variables_are_ignored() {
        let environment = LocaleEnvironment::default().with_var("HOME", "/root");

        assert_eq!(environment, LocaleEnvironment::default());
    }

    #[rstest]
    fn windows_defaults_fill_unset_variables() {
        let mut environment = LocaleEnvironment::default();
        let native = NativeLocale::Windows {
            ui_languages: vec![String::from("de_DE"), String::from("en_US")],
        };

        native.apply_defaults(&mut environment);

        assert_eq!(environment.get(LANG), Some("de_DE"));
        assert_eq!(environment.get(LANGUAGE), Some("de_DE:en_US"));
    }

    #[rstest]
    fn macos_defaults_convert_native_identifiers() {
        let mut environment = LocaleEnvironment::default();
        let native = NativeLocale::MacOs {
            identifier: String::from("zh-Hans_TW"),
            preferred_languages: vec![String::from("zh-Hant"), String::from("en-GB")],
        };

        native.apply_defaults(&mut environment);

        assert_eq!(environment.get(LANG), Some("zh_TW"));
        assert_eq!(environment.get(LANGUAGE), Some("zh_TW:en_GB"));
    }

    #[rstest]
    fn native_defaults_keep_existing_values() {
        let mut environment = LocaleEnvironment::default().with_var(LANG, "fr_FR");
        let native = NativeLocale::Windows {
            ui_languages: vec![String::from("de_DE")],
        };

        native.apply_defaults(&mut environment);

        assert_eq!(environment.get(LANG), Some("fr_FR"));
        assert_eq!(environment.get(LANGUAGE), Some("de_DE"));
    }

    #[rstest]
    fn posix_leaves_environment_untouched() {
        let mut environment = LocaleEnvironment::default();

        NativeLocale::Posix.apply_defaults(&mut environment);

        assert_eq!(environment, LocaleEnvironment::default());
    }

    #[rstest]
    fn captures_process_variables() {
        temp_env::with_vars(
            [
                (LANGUAGE, Some("sv:en")),
                (LANG, Some("sv_SE.UTF-8")),
                (LC_ALL, None::<&str>),
                (LC_MESSAGES, None),
                (LC_NUMERIC, None),
            ],
            || {
                let environment = LocaleEnvironment::from_process();

                assert_eq!(environment.get(LANGUAGE), Some("sv:en"));
                assert_eq!(environment.get(LANG), Some("sv_SE.UTF-8"));
                assert_eq!(environment.get(LC_ALL), None);
            },
        );
    }
}
