//! Source and output folder newtypes.
//!
//! Both roots are resolved to absolute UTF-8 paths and checked shallowly:
//! the source must have at least one top-level entry, the output must have
//! none. Constructing either type is the validation step of a run; nothing
//! is written before both exist.

use crate::error::{Result, ValidationError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::fs;
use std::path::Path;

/// Resolve `path` to an absolute UTF-8 path naming an existing folder.
///
/// This is the check the interactive prompts apply; emptiness is decided
/// later by [`SourceRoot::new`] and [`OutputRoot::new`].
///
/// # Errors
///
/// Returns [`ValidationError::FolderNotFound`] if nothing exists at `path`,
/// [`ValidationError::NotAFolder`] if it is not a directory, and
/// [`ValidationError::NonUtf8Path`] if the absolute path is not UTF-8.
pub fn resolve_folder(path: &Path) -> Result<Utf8PathBuf> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(ValidationError::FolderNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ValidationError::NotAFolder {
            path: path.to_path_buf(),
        });
    }
    let absolute = std::path::absolute(path).map_err(|_| ValidationError::FolderNotFound {
        path: path.to_path_buf(),
    })?;
    Utf8PathBuf::from_path_buf(absolute).map_err(|path| ValidationError::NonUtf8Path { path })
}

/// Return whether `folder` has no files or subdirectories.
fn is_empty_folder(folder: &Utf8Path) -> Result<bool> {
    let mut entries = fs::read_dir(folder).map_err(|err| ValidationError::UnreadableFolder {
        path: folder.to_owned(),
        reason: err.to_string(),
    })?;
    Ok(entries.next().is_none())
}

/// An existing, non-empty folder whose files are packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot(Utf8PathBuf);

impl SourceRoot {
    /// Validate `path` as a source root.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySource`] if the folder has no entries,
    /// or any error from [`resolve_folder`].
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let folder = resolve_folder(path.as_ref())?;
        if is_empty_folder(&folder)? {
            return Err(ValidationError::EmptySource { path: folder });
        }
        Ok(Self(folder))
    }

    /// Return the absolute folder path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

/// An existing, empty folder that receives the generated distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRoot(Utf8PathBuf);

impl OutputRoot {
    /// Validate `path` as an output root.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutputNotEmpty`] if the folder has any
    /// entry, or any error from [`resolve_folder`].
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let folder = resolve_folder(path.as_ref())?;
        if !is_empty_folder(&folder)? {
            return Err(ValidationError::OutputNotEmpty { path: folder });
        }
        Ok(Self(folder))
    }

    /// Return the absolute folder path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Utf8Path> for SourceRoot {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Utf8Path> for OutputRoot {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl fmt::Display for SourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OutputRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
