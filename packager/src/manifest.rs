//! Digest manifest for a generated distribution.
//!
//! The manifest lists one line per packaged file:
//!
//! ```text
//! <sha256-hex>\t<relative-path>\r\n
//! ```
//!
//! Lines follow the order in which files were packaged. On disk the text is
//! UTF-16 little endian with a byte order mark, see [`crate::encoding`].

use crate::digest::Sha256Digest;
use crate::encoding::{EncodingError, decode_utf16le, encode_utf16le};
use crate::error::ValidationError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use thiserror::Error;

/// Terminator written after every manifest line.
pub const LINE_ENDING: &str = "\r\n";

/// Separator between the digest and the relative path.
pub const FIELD_SEPARATOR: char = '\t';

/// Errors arising when reading a manifest back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The manifest bytes are not valid UTF-16.
    #[error("manifest encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// A line does not have the `<digest>\t<path>` shape.
    #[error("manifest line {line} is malformed: {reason}")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A line's digest field is not a valid SHA-256 digest.
    #[error("manifest line {line} has an invalid digest: {source}")]
    InvalidDigest {
        /// One-based line number.
        line: usize,
        /// The digest validation failure.
        #[source]
        source: ValidationError,
    },
}

/// Strip `root` from `path`, giving the path the manifest and archives use.
///
/// Returns `None` when `path` does not lie under `root` or names the root
/// itself.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use patch_packager::manifest::relative_path;
///
/// let rel = relative_path(Utf8Path::new("/src"), Utf8Path::new("/src/sub/b.txt"));
/// assert_eq!(rel.as_deref(), Some(Utf8Path::new("sub/b.txt")));
/// ```
#[must_use]
pub fn relative_path(root: &Utf8Path, path: &Utf8Path) -> Option<Utf8PathBuf> {
    path.strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_str().is_empty())
        .map(Utf8Path::to_path_buf)
}

/// One discovered source file and its content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: Utf8PathBuf,
    relative_path: Utf8PathBuf,
    digest: Sha256Digest,
}

impl FileRecord {
    /// Create a record for the file at `path`.
    #[must_use]
    pub const fn new(path: Utf8PathBuf, relative_path: Utf8PathBuf, digest: Sha256Digest) -> Self {
        Self {
            path,
            relative_path,
            digest,
        }
    }

    /// Absolute path of the source file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Path of the file relative to the source root.
    #[must_use]
    pub fn relative_path(&self) -> &Utf8Path {
        &self.relative_path
    }

    /// Digest of the file's content.
    #[must_use]
    pub const fn digest(&self) -> &Sha256Digest {
        &self.digest
    }
}

/// A single manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Digest of the file's content.
    pub digest: Sha256Digest,
    /// Path of the file relative to the source root.
    pub relative_path: Utf8PathBuf,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{FIELD_SEPARATOR}{}", self.digest, self.relative_path)
    }
}

impl From<&FileRecord> for ManifestEntry {
    fn from(record: &FileRecord) -> Self {
        Self {
            digest: record.digest.clone(),
            relative_path: record.relative_path.clone(),
        }
    }
}

/// Ordered list of manifest lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest from records, keeping their order.
    #[must_use]
    pub fn from_records(records: &[FileRecord]) -> Self {
        Self {
            entries: records.iter().map(ManifestEntry::from).collect(),
        }
    }

    /// Return the manifest lines in order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the manifest lists no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the manifest text with a line ending after every line.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{entry}{LINE_ENDING}"))
            .collect()
    }

    /// Render and encode the manifest as it is stored on disk.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_utf16le(&self.render())
    }

    /// Parse manifest text produced by [`Manifest::render`].
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MalformedLine`] for blank lines or lines
    /// without a separator or path, and [`ManifestError::InvalidDigest`]
    /// when the digest field is malformed.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let entries = text
            .split_terminator(LINE_ENDING)
            .enumerate()
            .map(|(index, line)| parse_line(index + 1, line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Decode and parse manifest bytes as stored on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Encoding`] if the bytes are not UTF-16, or
    /// any error from [`Manifest::parse`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ManifestError> {
        Self::parse(&decode_utf16le(bytes)?)
    }
}

fn parse_line(line: usize, text: &str) -> Result<ManifestEntry, ManifestError> {
    let malformed = |reason: &str| ManifestError::MalformedLine {
        line,
        reason: reason.to_owned(),
    };
    let (digest, path) = text
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| malformed("missing tab separator"))?;
    if path.is_empty() {
        return Err(malformed("missing relative path"));
    }
    let digest = Sha256Digest::try_from(digest)
        .map_err(|source| ManifestError::InvalidDigest { line, source })?;
    Ok(ManifestEntry {
        digest,
        relative_path: Utf8PathBuf::from(path),
    })
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
