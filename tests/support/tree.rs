use camino::{Utf8Path, Utf8PathBuf};
use quodlibet_i18n::testing::MoFileBuilder;
use tempfile::TempDir;

/// Temporary directory holding a `system` and a `local` locale tree.
pub struct LocaleTree {
    _directory: TempDir,
    root: Utf8PathBuf,
}

impl Default for LocaleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleTree {
    pub fn new() -> Self {
        let directory = tempfile::tempdir()
            .unwrap_or_else(|error| panic!("temporary directory should be created: {error}"));
        let root = Utf8PathBuf::from_path_buf(directory.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temporary directory should be UTF-8: {path:?}"));

        Self {
            _directory: directory,
            root,
        }
    }

    /// Root searched for domains without a local binding.
    pub fn system(&self) -> Utf8PathBuf {
        self.root.join("system")
    }

    /// Root handed to registrations as a local directory.
    pub fn local(&self) -> Utf8PathBuf {
        self.root.join("local")
    }

    /// Installs a catalog translating `message` beneath `root`.
    pub fn install(
        &self,
        root: &Utf8Path,
        language: &str,
        domain: &str,
        message: &str,
        translation: &str,
    ) {
        MoFileBuilder::new()
            .message(message, translation)
            .install(root, language, domain)
            .unwrap_or_else(|error| panic!("catalog should be written: {error}"));
    }
}
