//! Source tree scanner.
//!
//! Walks a folder depth-first with an explicit stack: pop a folder, take its
//! files, push its subfolders. A folder that cannot be listed is reported
//! and skipped so one unreadable branch does not stop the scan. The scanner
//! only discovers paths; it never opens files.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors arising while listing a folder.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The folder could not be listed. The scan skips it and continues.
    #[error("Error accessing directory {dir}: {source}")]
    Unreadable {
        /// The folder that failed to list.
        dir: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An entry name is not valid UTF-8. The scan stops.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
    /// An entry name contains a line break, which the line-based manifest
    /// cannot hold. The scan stops.
    #[error("path contains a line break: {0:?}")]
    LineBreakInName(Utf8PathBuf),
}

/// The direct contents of one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Files directly inside the folder.
    pub files: Vec<Utf8PathBuf>,
    /// Subfolders directly inside the folder.
    pub directories: Vec<Utf8PathBuf>,
}

/// Lists the direct contents of a folder, enabling test doubles.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryLister {
    /// List the files and subfolders directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Unreadable`] if the folder or any of its entries
    /// cannot be read, [`ScanError::NonUtf8Path`] for non-UTF-8 names and
    /// [`ScanError::LineBreakInName`] for names holding `\r` or `\n`.
    fn list(&self, dir: &Utf8Path) -> Result<DirectoryListing, ScanError>;
}

/// Lists folders on the local filesystem.
///
/// Entries come back in file-name order. Links to files count as files;
/// links to folders are not followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Utf8Path) -> Result<DirectoryListing, ScanError> {
        let mut entries = fs::read_dir(dir)
            .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
            .map_err(|source| unreadable(dir, source))?;
        entries.sort_by_key(fs::DirEntry::file_name);

        let mut listing = DirectoryListing::default();
        for entry in entries {
            let path = Utf8PathBuf::from_path_buf(entry.path()).map_err(ScanError::NonUtf8Path)?;
            if path.file_name().is_some_and(|name| name.contains(['\r', '\n'])) {
                return Err(ScanError::LineBreakInName(path));
            }
            let file_type = entry.file_type().map_err(|source| unreadable(dir, source))?;
            if file_type.is_dir() {
                listing.directories.push(path);
            } else if file_type.is_file() {
                listing.files.push(path);
            } else if file_type.is_symlink() {
                classify_link(path, &mut listing);
            } else {
                debug!("ignoring special file {path}");
            }
        }
        Ok(listing)
    }
}

fn unreadable(dir: &Utf8Path, source: io::Error) -> ScanError {
    ScanError::Unreadable {
        dir: dir.to_owned(),
        source,
    }
}

fn classify_link(path: Utf8PathBuf, listing: &mut DirectoryListing) {
    match fs::metadata(&path) {
        Ok(target) if target.is_file() => listing.files.push(path),
        Ok(target) if target.is_dir() => debug!("not following folder link {path}"),
        Ok(_) => debug!("ignoring link to special file {path}"),
        Err(err) => debug!("ignoring dangling link {path}: {err}"),
    }
}

/// A folder the scan could not list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDirectory {
    /// The folder that was skipped.
    pub path: Utf8PathBuf,
    /// Why listing it failed.
    pub reason: String,
}

/// Everything a scan found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Files in traversal order.
    pub files: Vec<Utf8PathBuf>,
    /// Folders skipped because they could not be listed.
    pub skipped: Vec<SkippedDirectory>,
}

/// Scan `root` using `lister`.
///
/// A folder's files are only taken once its whole listing succeeded, so a
/// folder that fails part-way contributes nothing.
///
/// # Errors
///
/// Returns [`ScanError::NonUtf8Path`] if any name is not UTF-8 and
/// [`ScanError::LineBreakInName`] if any name holds a line break. Unreadable
/// folders are logged, recorded in [`ScanReport::skipped`] and do not fail
/// the scan.
pub fn scan_with(root: &Utf8Path, lister: &dyn DirectoryLister) -> Result<ScanReport, ScanError> {
    let mut report = ScanReport::default();
    let mut pending = vec![root.to_owned()];

    while let Some(dir) = pending.pop() {
        match lister.list(&dir) {
            Ok(listing) => {
                report.files.extend(listing.files);
                pending.extend(listing.directories);
            }
            Err(err @ ScanError::Unreadable { .. }) => {
                warn!("{err}");
                report.skipped.push(SkippedDirectory {
                    path: dir,
                    reason: error_reason(&err),
                });
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "scanned {root}: {} files, {} skipped folders",
        report.files.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Scan `root` on the local filesystem.
///
/// # Errors
///
/// See [`scan_with`].
pub fn scan(root: &Utf8Path) -> Result<ScanReport, ScanError> {
    scan_with(root, &FsLister)
}

fn error_reason(err: &ScanError) -> String {
    match err {
        ScanError::Unreadable { source, .. } => source.to_string(),
        ScanError::NonUtf8Path(_) | ScanError::LineBreakInName(_) => err.to_string(),
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
