//! Packaging pipeline orchestration.
//!
//! A run validates its inputs, scans the source tree, hashes every file,
//! writes one archive per file and finally commits the manifest and the
//! version marker:
//!
//! 1. [`PackageRequest::validate`] checks both folders and the version
//!    label. Nothing is written if it fails.
//! 2. Every discovered file is hashed before any output exists, so an
//!    unreadable file aborts the run with the output root still empty.
//! 3. Archives are written under the archive folder.
//! 4. The manifest, then the version marker, are written to temporary files
//!    in the output root and renamed into place. A present manifest
//!    therefore implies a complete archive set.

use crate::archive::emit_archive;
use crate::digest::compute_sha256;
use crate::encoding::encode_utf16le;
use crate::error::ValidationError;
use crate::layout::PackageLayout;
use crate::manifest::{FileRecord, Manifest, relative_path};
use crate::packaging_error::{PackagingError, Result};
use crate::roots::{OutputRoot, SourceRoot};
use crate::scanner::{DirectoryLister, FsLister, SkippedDirectory, scan_with};
use crate::version_label::VersionLabel;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Order of the manifest lines and archive writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryOrder {
    /// The order the scanner discovered files in.
    #[default]
    Traversal,
    /// Sorted by relative path, for reproducible manifests.
    Sorted,
}

/// Validated inputs for one packaging run.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    /// Folder whose files are packaged.
    pub source: SourceRoot,
    /// Empty folder receiving the distribution.
    pub output: OutputRoot,
    /// Label written to the version marker.
    pub version: VersionLabel,
    /// Names of the generated files and folders.
    pub layout: PackageLayout,
    /// Order of manifest lines.
    pub order: EntryOrder,
}

impl PackageRequest {
    /// Validate raw inputs into a request using the standard layout.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the source
    /// folder, then the output folder, then the version label.
    pub fn validate(
        source: impl AsRef<Path>,
        output: impl AsRef<Path>,
        version: &str,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            source: SourceRoot::new(source)?,
            output: OutputRoot::new(output)?,
            version: VersionLabel::try_from(version)?,
            layout: PackageLayout::standard(),
            order: EntryOrder::default(),
        })
    }

    /// Return the request with `order` applied.
    #[must_use]
    pub fn with_order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// The version label written.
    pub version: String,
    /// Number of files packaged.
    pub file_count: usize,
    /// Folder holding the archives.
    pub archive_root: Utf8PathBuf,
    /// Location of the manifest.
    pub manifest_path: Utf8PathBuf,
    /// Location of the version marker.
    pub version_path: Utf8PathBuf,
    /// Folders the scan could not list.
    pub skipped: Vec<SkippedDirectory>,
}

/// Run the pipeline against the local filesystem.
///
/// # Errors
///
/// See [`package_with`].
pub fn package(request: &PackageRequest) -> Result<PackageSummary> {
    package_with(request, &FsLister)
}

/// Run the pipeline, listing folders through `lister`.
///
/// # Errors
///
/// Returns [`PackagingError::Scan`] for non-UTF-8 names,
/// [`PackagingError::Hash`] if a file cannot be read,
/// [`PackagingError::Archive`] if an archive cannot be written and
/// [`PackagingError::Write`] if a marker file cannot be committed. Output
/// written before the failure is left in place.
pub fn package_with(
    request: &PackageRequest,
    lister: &dyn DirectoryLister,
) -> Result<PackageSummary> {
    let source = request.source.as_path();
    let output = request.output.as_path();
    let layout = &request.layout;

    info!("scanning {source}");
    let report = scan_with(source, lister)?;

    let mut records = hash_files(source, &report.files)?;
    if request.order == EntryOrder::Sorted {
        records.sort_by(|a, b| a.relative_path().cmp(b.relative_path()));
    }

    info!("writing {} archives under {output}", records.len());
    emit_archives(&records, output, layout)?;

    let manifest_path = layout.manifest_path(output);
    commit_file(output, &manifest_path, &Manifest::from_records(&records).to_bytes())?;

    let version_path = layout.version_path(output);
    commit_file(output, &version_path, &encode_utf16le(request.version.as_str()))?;

    info!("packaged {} files as version {}", records.len(), request.version);
    Ok(PackageSummary {
        version: request.version.as_str().to_owned(),
        file_count: records.len(),
        archive_root: layout.archive_root(output),
        manifest_path,
        version_path,
        skipped: report.skipped,
    })
}

/// Hash every file, pairing it with its path relative to `root`.
fn hash_files(root: &Utf8Path, files: &[Utf8PathBuf]) -> Result<Vec<FileRecord>> {
    files
        .iter()
        .map(|path| {
            let relative =
                relative_path(root, path).ok_or_else(|| PackagingError::OutsideSourceRoot {
                    path: path.clone(),
                    root: root.to_owned(),
                })?;
            let digest =
                compute_sha256(path.as_std_path()).map_err(|source| PackagingError::Hash {
                    path: path.clone(),
                    source,
                })?;
            debug!("{digest}  {relative}");
            Ok(FileRecord::new(path.clone(), relative, digest))
        })
        .collect()
}

fn emit_archives(records: &[FileRecord], output: &Utf8Path, layout: &PackageLayout) -> Result<()> {
    for record in records {
        let destination = layout.archive_path(output, record.relative_path());
        emit_archive(record.path(), record.relative_path(), &destination).map_err(|source| {
            PackagingError::Archive {
                path: destination.clone(),
                source,
            }
        })?;
    }
    Ok(())
}

/// Write `bytes` to a temporary file in `dir` and rename it to `path`.
fn commit_file(dir: &Utf8Path, path: &Utf8Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source: io::Error| PackagingError::Write {
        path: path.to_owned(),
        source,
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    staged.write_all(bytes).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged
        .persist(path)
        .map_err(|err| write_error(err.error))?;
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
