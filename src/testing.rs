//! Test helpers for building catalogs without the gettext toolchain.
//!
//! [`MoFileBuilder`] writes small little-endian `.mo` files so tests can lay
//! out `<root>/<lang>/LC_MESSAGES/<domain>.mo` trees in temporary
//! directories.

use std::collections::BTreeMap;
use std::fs;
use std::io;

use camino::Utf8Path;

use crate::catalog::CONTEXT_SEPARATOR;

const MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: usize = 28;
const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

/// Builder for compiled gettext catalogs.
#[derive(Clone, Debug)]
pub struct MoFileBuilder {
    plural_forms: String,
    entries: BTreeMap<String, String>,
}

impl Default for MoFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MoFileBuilder {
    /// Creates a builder using the English plural rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plural_forms: DEFAULT_PLURAL_FORMS.to_owned(),
            entries: BTreeMap::new(),
        }
    }

    /// Replaces the `Plural-Forms` header.
    #[must_use]
    pub fn plural_forms(mut self, header: &str) -> Self {
        header.clone_into(&mut self.plural_forms);
        self
    }

    /// Adds a plain translation.
    #[must_use]
    pub fn message(mut self, message: &str, translation: &str) -> Self {
        self.entries
            .insert(message.to_owned(), translation.to_owned());
        self
    }

    /// Adds a context-qualified translation.
    #[must_use]
    pub fn context(self, context: &str, message: &str, translation: &str) -> Self {
        let key = format!("{context}{CONTEXT_SEPARATOR}{message}");
        self.message(&key, translation)
    }

    /// Adds a plural translation with one entry per plural form.
    #[must_use]
    pub fn plural(self, singular: &str, plural: &str, forms: &[&str]) -> Self {
        let key = format!("{singular}\0{plural}");
        self.message(&key, &forms.join("\0"))
    }

    /// Adds a context-qualified plural translation.
    #[must_use]
    pub fn context_plural(
        self,
        context: &str,
        singular: &str,
        plural: &str,
        forms: &[&str],
    ) -> Self {
        let key = format!("{context}{CONTEXT_SEPARATOR}{singular}");
        self.plural(&key, plural, forms)
    }

    /// Serialises the catalog, metadata entry first.
    ///
    /// # Panics
    ///
    /// Panics if the catalog exceeds the 4 GiB offsets of the format.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let metadata = format!(
            "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: {}\n",
            self.plural_forms
        );
        let mut entries: Vec<(&str, &str)> = vec![("", metadata.as_str())];
        entries.extend(
            self.entries
                .iter()
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );

        let count = entries.len();
        let originals_offset = HEADER_LEN;
        let translations_offset = originals_offset + count * 8;
        let mut data_offset = translations_offset + count * 8;

        let mut original_table = Vec::with_capacity(count * 8);
        let mut translation_table = Vec::with_capacity(count * 8);
        let mut data = Vec::new();

        for strings_at in [0, 1] {
            for entry in &entries {
                let value = if strings_at == 0 { entry.0 } else { entry.1 };
                let table = if strings_at == 0 {
                    &mut original_table
                } else {
                    &mut translation_table
                };
                push_u32(table, value.len());
                push_u32(table, data_offset);
                data.extend_from_slice(value.as_bytes());
                data.push(0);
                data_offset += value.len() + 1;
            }
        }

        let mut bytes = Vec::with_capacity(data_offset);
        push_u32(&mut bytes, MAGIC as usize);
        push_u32(&mut bytes, 0);
        push_u32(&mut bytes, count);
        push_u32(&mut bytes, originals_offset);
        push_u32(&mut bytes, translations_offset);
        push_u32(&mut bytes, 0);
        push_u32(&mut bytes, data_offset);
        bytes.extend(original_table);
        bytes.extend(translation_table);
        bytes.extend(data);
        bytes
    }

    /// Writes the catalog to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from creating directories or writing the file.
    pub fn write_to(&self, path: &Utf8Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.build())
    }

    /// Writes the catalog for `domain` and `language` beneath `root`.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from [`Self::write_to`].
    pub fn install(&self, root: &Utf8Path, language: &str, domain: &str) -> io::Result<()> {
        self.write_to(&root.join(language).join("LC_MESSAGES").join(format!("{domain}.mo")))
    }
}

fn push_u32(buffer: &mut Vec<u8>, value: usize) {
    let value = u32::try_from(value)
        .unwrap_or_else(|_| panic!("catalog offset {value} exceeds the .mo format"));
    buffer.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        let mut word = [0_u8; 4];
        word.copy_from_slice(&bytes[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    #[rstest]
    fn header_describes_the_tables() {
        let bytes = MoFileBuilder::new().message("Play", "Abspielen").build();

        assert_eq!(read_u32(&bytes, 0), MAGIC);
        assert_eq!(read_u32(&bytes, 8), 2);
        assert_eq!(read_u32(&bytes, 12), 28);
        assert_eq!(read_u32(&bytes, 16), 44);
    }

    #[rstest]
    fn keys_are_sorted_after_the_metadata() {
        let bytes = MoFileBuilder::new()
            .message("b", "2")
            .message("a", "1")
            .build();

        let second_key_offset = read_u32(&bytes, 28 + 8 + 4) as usize;
        assert_eq!(&bytes[second_key_offset..=second_key_offset], b"a");
    }

    #[rstest]
    fn install_writes_the_standard_layout() {
        let directory = tempfile::tempdir()
            .unwrap_or_else(|error| panic!("temporary directory should be created: {error}"));
        let root = Utf8Path::from_path(directory.path())
            .unwrap_or_else(|| panic!("temporary directory should be UTF-8"));

        MoFileBuilder::new()
            .install(root, "de", "quodlibet")
            .unwrap_or_else(|error| panic!("catalog should be written: {error}"));

        assert!(root.join("de/LC_MESSAGES/quodlibet.mo").is_file());
    }
}
