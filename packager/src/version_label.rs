//! Version label newtype for the version marker file.
//!
//! The label is whatever integer text the caller supplied. It is only
//! checked for parsing as a signed 32-bit integer, ignoring surrounding
//! whitespace, and is otherwise written out exactly as given.

use crate::error::{Result, ValidationError};
use std::fmt;

/// A validated, integer-valued version label.
///
/// # Examples
///
/// ```
/// use patch_packager::version_label::VersionLabel;
///
/// let label = VersionLabel::try_from(" 42 ").unwrap();
/// assert_eq!(label.as_str(), " 42 ");
/// assert_eq!(label.number(), 42);
/// assert!(VersionLabel::try_from("4.2").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionLabel {
    text: String,
    number: i32,
}

impl VersionLabel {
    /// Return the label text as persisted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Return the parsed integer value.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }
}

impl TryFrom<&str> for VersionLabel {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidVersion {
                value: value.to_owned(),
                reason: "version must not be empty".to_owned(),
            });
        }
        let number = trimmed
            .parse::<i32>()
            .map_err(|err| ValidationError::InvalidVersion {
                value: value.to_owned(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            text: value.to_owned(),
            number,
        })
    }
}

impl TryFrom<String> for VersionLabel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for VersionLabel {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
