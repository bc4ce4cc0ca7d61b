//! Count-bearing phrases with locale digit grouping.
//!
//! A numeric phrase picks the singular or plural template for a count, then
//! replaces the count placeholder with the count formatted for the active
//! numeric locale, so `Add %d songs` becomes `Add 12,345 songs` under
//! `en_US`.

use std::str::FromStr;

use log::debug;
use num_format::{Locale, ToFormattedString};
use unic_langid::LanguageIdentifier;

use crate::catalog::Translations;

/// Digit grouping applied to counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NumberFormat {
    /// Plain digits, as in the C locale.
    #[default]
    Ungrouped,
    /// Digits grouped using the conventions of a CLDR locale.
    Grouped(Locale),
}

impl NumberFormat {
    /// Derives the grouping for a POSIX locale name such as `de_DE.UTF-8`.
    ///
    /// `C`, `POSIX`, an absent name, and locales without grouping data all
    /// produce [`NumberFormat::Ungrouped`].
    #[must_use]
    pub fn for_locale(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::Ungrouped;
        };
        let base = name
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        if matches!(base, "" | "C" | "POSIX") {
            return Self::Ungrouped;
        }

        let identifier = match LanguageIdentifier::from_str(&base.replace('_', "-")) {
            Ok(identifier) => identifier,
            Err(error) => {
                debug!(
                    target: "i18n::phrase",
                    "numeric locale `{name}` is not a language identifier: {error}",
                );
                return Self::Ungrouped;
            }
        };

        [identifier.to_string(), identifier.language.as_str().to_owned()]
            .iter()
            .find_map(|candidate| Locale::from_name(candidate).ok())
            .map_or(Self::Ungrouped, Self::Grouped)
    }

    /// Formats `count` with this grouping.
    ///
    /// ```
    /// use quodlibet_i18n::phrase::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::for_locale(Some("en_US.UTF-8")).format(12345), "12,345");
    /// assert_eq!(NumberFormat::for_locale(Some("C")).format(12345), "12345");
    /// ```
    #[must_use]
    pub fn format(&self, count: u64) -> String {
        match self {
            Self::Ungrouped => count.to_string(),
            Self::Grouped(locale) => count.to_formatted_string(locale),
        }
    }
}

/// Replaces the count placeholder in `template` with `count`.
///
/// Without a `placeholder` every `%d` is replaced; with one, every
/// `%(placeholder)d` and `%(placeholder)s`. `%%` becomes `%` and any other
/// `%` sequence is kept as written.
#[must_use]
pub fn substitute_count(template: &str, placeholder: Option<&str>, count: &str) -> String {
    let named = placeholder.map(|key| [format!("({key})d"), format!("({key})s")]);
    let mut output = String::with_capacity(template.len() + count.len());
    let mut rest = template;

    while let Some((head, tail)) = rest.split_once('%') {
        output.push_str(head);
        if let Some(after) = tail.strip_prefix('%') {
            output.push('%');
            rest = after;
            continue;
        }

        let after_token = match &named {
            None => tail.strip_prefix('d'),
            Some(tokens) => tokens
                .iter()
                .find_map(|token| tail.strip_prefix(token.as_str())),
        };
        match after_token {
            Some(after) => {
                output.push_str(count);
                rest = after;
            }
            None => {
                output.push('%');
                rest = tail;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Builds the phrase for `count` from a singular and plural template.
///
/// The template is chosen and translated through `translations`, so the
/// debug wrapper applies to the result.
#[must_use]
pub fn numeric_phrase(
    translations: &Translations,
    format: NumberFormat,
    singular: &str,
    plural: &str,
    count: u64,
    placeholder: Option<&str>,
) -> String {
    let formatted = format.format(count);
    let template = translations.ngettext(singular, plural, count);
    substitute_count(&template, placeholder, &formatted)
}
