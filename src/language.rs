//! Language tag conversions and `LANGUAGE` list handling.
//!
//! Platform locale APIs report BCP 47 tags (`en-US`, `zh-Hans`) while the
//! catalog search expects POSIX-style `ll_CC` names. The helpers here convert
//! between the two on a best-effort basis; unrecognised input degrades to a
//! guess rather than an error.

/// Marker selecting "no translation" in a language priority list.
pub const NO_TRANSLATION: &str = "C";

fn is_iso_code(segment: &str) -> bool {
    segment.chars().count() == 2 && segment.chars().all(char::is_alphabetic)
}

/// Converts a BCP 47 tag into a value suitable for the `LANGUAGE` variable.
///
/// Only ISO 639-1 language subtags are understood. The region is taken from
/// the second segment, or from the third when the second is a script.
///
/// # Examples
///
/// ```
/// use quodlibet_i18n::language::bcp47_to_language;
///
/// assert_eq!(bcp47_to_language("en-US"), "en_US");
/// assert_eq!(bcp47_to_language("sr-Latn-RS"), "sr_RS");
/// assert_eq!(bcp47_to_language("zh-Hant"), "zh_TW");
/// ```
#[must_use]
pub fn bcp47_to_language(tag: &str) -> String {
    match tag {
        "zh-Hans" => return String::from("zh_CN"),
        "zh-Hant" => return String::from("zh_TW"),
        _ => {}
    }

    let mut parts = tag.split('-');
    let language = parts.next().unwrap_or_default();
    if !is_iso_code(language) {
        return language.replace(':', "");
    }

    let second = parts.next();
    let third = parts.next();
    let region = [second, third]
        .into_iter()
        .flatten()
        .find(|segment| is_iso_code(segment));

    match region {
        Some(region) => format!("{language}_{region}"),
        None => language.to_owned(),
    }
}

/// Normalises a colon-separated language list given as an override.
///
/// Entries written as BCP 47 tags are converted with [`bcp47_to_language`];
/// entries already in `ll_CC` form are kept as written.
///
/// ```
/// use quodlibet_i18n::language::normalise_language_list;
///
/// assert_eq!(normalise_language_list("pt-BR"), "pt_BR");
/// assert_eq!(normalise_language_list("de_DE:pt-BR:en"), "de_DE:pt_BR:en");
/// ```
#[must_use]
pub fn normalise_language_list(list: &str) -> String {
    let entries: Vec<String> = list
        .split(':')
        .map(|entry| {
            if entry.contains('-') {
                bcp47_to_language(entry)
            } else {
                entry.to_owned()
            }
        })
        .collect();
    entries.join(":")
}

/// Converts a macOS `NSLocale` identifier into a value suitable for `LANG`.
///
/// Identifiers combine a BCP 47 language with a trailing `_REGION`, for
/// example `zh-Hans_TW`; only the language part of the prefix is kept.
///
/// ```
/// use quodlibet_i18n::language::native_locale_to_lang;
///
/// assert_eq!(native_locale_to_lang("zh-Hans_TW"), "zh_TW");
/// assert_eq!(native_locale_to_lang("de"), "de");
/// ```
#[must_use]
pub fn native_locale_to_lang(identifier: &str) -> String {
    let Some((prefix, region)) = identifier.rsplit_once('_') else {
        return identifier.to_owned();
    };

    let converted = bcp47_to_language(prefix);
    let language = converted.split('_').next().unwrap_or_default();
    format!("{language}_{region}")
}

/// Appends [`NO_TRANSLATION`] after every English entry of a priority list.
///
/// Catalog lookup does not recognise English as "use the source strings", so
/// a list such as `de:en:fr` would otherwise skip on to French. Lists with a
/// single entry are returned unchanged.
#[must_use]
pub fn sanitise_languages<S: AsRef<str>>(languages: &[S]) -> Vec<String> {
    let many = languages.len() > 1;
    let mut sanitised = Vec::with_capacity(languages.len() * 2);

    for language in languages.iter().map(AsRef::as_ref) {
        sanitised.push(language.to_owned());
        if many && language.starts_with("en") {
            sanitised.push(NO_TRANSLATION.to_owned());
        }
    }

    sanitised
}

/// Applies [`sanitise_languages`] to a colon-separated `LANGUAGE` value.
///
/// ```
/// use quodlibet_i18n::language::sanitise_language_list;
///
/// assert_eq!(sanitise_language_list("de:en:fr"), "de:en:C:fr");
/// assert_eq!(sanitise_language_list("en"), "en");
/// ```
#[must_use]
pub fn sanitise_language_list(list: &str) -> String {
    let languages: Vec<&str> = list.split(':').collect();
    sanitise_languages(&languages).join(":")
}

/// Expands a locale name into the names tried when searching for catalogs.
///
/// `de_DE.UTF-8@euro` yields every combination of territory, codeset, and
/// modifier, most specific first and ending with the bare language.
#[must_use]
pub fn expand_locale(locale: &str) -> Vec<String> {
    let (rest, modifier) = split_suffix(locale, '@');
    let (rest, codeset) = split_suffix(rest, '.');
    let (language, territory) = split_suffix(rest, '_');

    // Codeset is the least significant component so that `ll_CC` outranks
    // `ll.codeset`.
    let parts = [(territory, 0b010_u8), (codeset, 0b001), (modifier, 0b100)];
    let mask = parts
        .iter()
        .filter(|(part, _)| part.is_some())
        .fold(0_u8, |mask, (_, bit)| mask | bit);

    let mut expanded: Vec<String> = (0..=mask)
        .filter(|combination| combination & !mask == 0)
        .map(|combination| {
            let mut name = language.to_owned();
            for (part, bit) in parts {
                if let Some(part) = part.filter(|_| combination & bit != 0) {
                    name.push_str(part);
                }
            }
            name
        })
        .collect();
    expanded.reverse();
    expanded
}

/// Splits `value` at the first `separator`, keeping the separator on the
/// suffix.
fn split_suffix(value: &str, separator: char) -> (&str, Option<&str>) {
    match value.find(separator) {
        Some(index) => {
            let (head, tail) = value.split_at(index);
            (head, Some(tail))
        }
        None => (value, None),
    }
}

/// Builds the ordered catalog search names for a language priority list.
///
/// [`NO_TRANSLATION`] is appended when absent, each entry is expanded with
/// [`expand_locale`], duplicates are dropped, and the list stops at the first
/// [`NO_TRANSLATION`].
#[must_use]
pub fn search_candidates<S: AsRef<str>>(languages: &[S]) -> Vec<String> {
    let mut requested: Vec<&str> = languages
        .iter()
        .map(AsRef::as_ref)
        .filter(|language| !language.is_empty())
        .collect();
    if !requested.contains(&NO_TRANSLATION) {
        requested.push(NO_TRANSLATION);
    }

    let mut candidates: Vec<String> = Vec::new();
    for name in requested.into_iter().flat_map(expand_locale) {
        if name == NO_TRANSLATION {
            break;
        }
        if !candidates.contains(&name) {
            candidates.push(name);
        }
    }
    candidates
}
