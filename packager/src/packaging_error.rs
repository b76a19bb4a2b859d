//! Error types for a packaging run.
//!
//! Splits failures into the two outcomes a run can have: validation errors,
//! raised before anything is written, and fatal errors raised while the
//! distribution is being generated.

use crate::archive::ArchiveError;
use crate::error::ValidationError;
use crate::prompt::PromptError;
use crate::scanner::ScanError;
use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// Exit code for a run that completed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for a run aborted while generating output.
pub const EXIT_GENERATION_FAILED: i32 = 1;

/// Exit code for a run rejected before generating output.
pub const EXIT_INVALID_INPUT: i32 = 2;

/// Errors arising from a packaging run.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An input failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading interactive input failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The source tree could not be scanned.
    #[error("failed to scan source tree: {0}")]
    Scan(#[from] ScanError),

    /// A discovered file does not lie under the source root.
    #[error("file {path} is outside the source root {root}")]
    OutsideSourceRoot {
        /// The discovered file.
        path: Utf8PathBuf,
        /// The source root.
        root: Utf8PathBuf,
    },

    /// A source file could not be hashed.
    #[error("failed to hash {path}: {source}")]
    Hash {
        /// The file being hashed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An archive could not be written.
    #[error("failed to create archive {path}: {source}")]
    Archive {
        /// The archive being written.
        path: Utf8PathBuf,
        /// The underlying archive error.
        #[source]
        source: ArchiveError,
    },

    /// A marker file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file being written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The run summary could not be serialized.
    #[error("summary serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PackagingError {
    /// Process exit code for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use patch_packager::error::ValidationError;
    /// use patch_packager::packaging_error::{EXIT_INVALID_INPUT, PackagingError};
    ///
    /// let err = PackagingError::from(ValidationError::MissingInput { what: "version" });
    /// assert_eq!(err.exit_code(), EXIT_INVALID_INPUT);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Prompt(PromptError::EndOfInput { .. }) => {
                EXIT_INVALID_INPUT
            }
            _ => EXIT_GENERATION_FAILED,
        }
    }
}

/// Result type alias using [`PackagingError`].
pub type Result<T> = std::result::Result<T, PackagingError>;
