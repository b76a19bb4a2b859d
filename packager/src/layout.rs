//! Fixed names used in a generated distribution.
//!
//! The layout of an output root is:
//!
//! ```text
//! <output>/version.txt
//! <output>/filelist.txt
//! <output>/zips/<relative path>.zip
//! ```
//!
//! The names are read-only for the whole process and are handed to the
//! packaging pipeline through [`PackageLayout`] rather than read from globals.

use camino::{Utf8Path, Utf8PathBuf};

/// Title printed at the start of an interactive session.
pub const TITLE: &str = "Package Creator";

/// Folder under the output root that mirrors the source tree.
pub const ARCHIVE_FOLDER: &str = "zips";

/// Extension appended to each source file name to form its archive name.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// File holding the version label.
pub const VERSION_FILE: &str = "version.txt";

/// File holding the digest manifest.
pub const MANIFEST_FILE: &str = "filelist.txt";

/// Names of everything the pipeline writes under an output root.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use patch_packager::layout::PackageLayout;
///
/// let layout = PackageLayout::standard();
/// let path = layout.archive_path(Utf8Path::new("/out"), Utf8Path::new("sub/b.txt"));
/// assert_eq!(path, Utf8Path::new("/out/zips/sub/b.txt.zip"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageLayout {
    /// Folder under the output root holding the per-file archives.
    pub archive_folder: &'static str,
    /// Extension appended to each archive's file name.
    pub archive_extension: &'static str,
    /// Name of the version marker file.
    pub version_file: &'static str,
    /// Name of the manifest file.
    pub manifest_file: &'static str,
}

impl PackageLayout {
    /// Return the layout consumed by the update pipeline.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            archive_folder: ARCHIVE_FOLDER,
            archive_extension: ARCHIVE_EXTENSION,
            version_file: VERSION_FILE,
            manifest_file: MANIFEST_FILE,
        }
    }

    /// Directory under `output` that holds every archive.
    #[must_use]
    pub fn archive_root(&self, output: &Utf8Path) -> Utf8PathBuf {
        output.join(self.archive_folder)
    }

    /// Location of the archive for the file at `relative_path`.
    #[must_use]
    pub fn archive_path(&self, output: &Utf8Path, relative_path: &Utf8Path) -> Utf8PathBuf {
        let mut file_name = relative_path.as_str().to_owned();
        file_name.push_str(self.archive_extension);
        self.archive_root(output).join(file_name)
    }

    /// Location of the manifest file.
    #[must_use]
    pub fn manifest_path(&self, output: &Utf8Path) -> Utf8PathBuf {
        output.join(self.manifest_file)
    }

    /// Location of the version marker file.
    #[must_use]
    pub fn version_path(&self, output: &Utf8Path) -> Utf8PathBuf {
        output.join(self.version_file)
    }
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self::standard()
    }
}
