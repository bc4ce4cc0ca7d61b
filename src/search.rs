//! Catalog discovery beneath a locale directory.
//!
//! Catalogs follow the standard `<root>/<lang>/LC_MESSAGES/<domain>.mo`
//! layout. Discovery only checks for files; parsing happens in
//! [`crate::catalog::GettextCatalog`].

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::language::NO_TRANSLATION;

/// Returns the catalog path for `domain` and `language` beneath `root`.
#[must_use]
pub fn catalog_path(root: &Utf8Path, language: &str, domain: &str) -> Utf8PathBuf {
    root.join(language)
        .join("LC_MESSAGES")
        .join(format!("{domain}.mo"))
}

/// Returns the existing catalog files for `domain`, in `candidates` order.
#[must_use]
pub fn find_catalogs<S: AsRef<str>>(
    root: &Utf8Path,
    domain: &str,
    candidates: &[S],
) -> Vec<Utf8PathBuf> {
    candidates
        .iter()
        .map(|language| catalog_path(root, language.as_ref(), domain))
        .filter(|path| path.is_file())
        .collect()
}

/// Lists the languages with a catalog for `domain` beneath `root`.
///
/// The result always starts with [`NO_TRANSLATION`], followed by the
/// remaining languages in sorted order. A missing or unreadable `root`
/// yields only the marker.
#[must_use]
pub fn available_languages(root: &Utf8Path, domain: &str) -> Vec<String> {
    let mut languages: Vec<String> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|language| catalog_path(root, language, domain).is_file())
            .collect(),
        Err(error) => {
            debug!(
                target: "i18n::search",
                "cannot list locale directory {root}: {error}",
            );
            Vec::new()
        }
    };
    languages.sort_unstable();

    let mut result = Vec::with_capacity(languages.len() + 1);
    result.push(NO_TRANSLATION.to_owned());
    result.extend(languages);
    result
}
