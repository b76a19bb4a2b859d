//! Error types for input validation.
//!
//! Each variant describes why a source folder, output folder, version label
//! or digest string was rejected. The messages are the ones printed to the
//! console, so they read as complete sentences.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from invalid inputs to a packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The folder does not exist.
    #[error("Folder '{path}' not found.")]
    FolderNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The path exists but is not a directory.
    #[error("'{path}' is not a folder.")]
    NotAFolder {
        /// The offending path.
        path: PathBuf,
    },

    /// The path cannot be represented as UTF-8.
    #[error("Path '{path}' is not valid UTF-8.")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The folder exists but its entries could not be read.
    #[error("Folder '{path}' could not be read: {reason}")]
    UnreadableFolder {
        /// The folder that failed to list.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// The source folder has no files or subdirectories.
    #[error("Folder '{path}' is empty.")]
    EmptySource {
        /// The source folder.
        path: Utf8PathBuf,
    },

    /// The output folder already has files or subdirectories.
    #[error("Output folder '{path}' is not empty.")]
    OutputNotEmpty {
        /// The output folder.
        path: Utf8PathBuf,
    },

    /// The version label is not an integer.
    #[error("Invalid version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected input.
        value: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// A SHA-256 digest is not a 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A required value was neither passed on the command line nor prompted for.
    #[error("missing {what}; pass it on the command line or drop --no-prompt")]
    MissingInput {
        /// Human-readable name of the missing value.
        what: &'static str,
    },
}

/// Result type alias using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;
