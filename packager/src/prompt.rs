//! Interactive console prompts.
//!
//! Each prompt prints a question, then reads lines until one is valid,
//! printing a hint after every invalid answer. The prompter is generic over
//! its input and output so sessions can be scripted in tests.

use crate::roots::resolve_folder;
use crate::version_label::VersionLabel;
use camino::Utf8PathBuf;
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

/// Question asked for the source folder.
pub const SOURCE_PROMPT: &str = "Enter the source folder path:";

/// Question asked for the output folder.
pub const OUTPUT_PROMPT: &str = "Enter the output folder path:";

/// Question asked for the version label.
pub const VERSION_PROMPT: &str = "Enter version number:";

/// Hint printed after an unusable folder path.
pub const INVALID_FOLDER: &str = "Invalid folder path. Please try again.";

/// Hint printed after a non-integer version.
pub const INVALID_VERSION: &str = "Invalid version. Please enter a valid number:";

/// Errors arising while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before a valid answer was given.
    #[error("input ended while waiting for the {what}")]
    EndOfInput {
        /// Human-readable name of the awaited value.
        what: &'static str,
    },

    /// Reading input or writing a prompt failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reads answers from `input`, writing questions and hints to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for the source folder until an existing folder is named.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::EndOfInput`] if input runs out, or
    /// [`PromptError::Io`] on console failures.
    pub fn source_folder(&mut self) -> Result<Utf8PathBuf, PromptError> {
        self.folder(SOURCE_PROMPT, "source folder")
    }

    /// Ask for the output folder until an existing folder is named.
    ///
    /// Emptiness is not checked here.
    ///
    /// # Errors
    ///
    /// See [`Prompter::source_folder`].
    pub fn output_folder(&mut self) -> Result<Utf8PathBuf, PromptError> {
        self.folder(OUTPUT_PROMPT, "output folder")
    }

    /// Ask for the version until the answer parses as an integer.
    ///
    /// # Errors
    ///
    /// See [`Prompter::source_folder`].
    pub fn version(&mut self) -> Result<VersionLabel, PromptError> {
        self.ask(VERSION_PROMPT, INVALID_VERSION, "version number", |answer| {
            VersionLabel::try_from(answer).ok()
        })
    }

    /// Write a line to the console.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] if writing fails.
    pub fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    fn folder(&mut self, question: &str, what: &'static str) -> Result<Utf8PathBuf, PromptError> {
        self.ask(question, INVALID_FOLDER, what, |answer| {
            resolve_folder(Path::new(answer)).ok()
        })
    }

    fn ask<T>(
        &mut self,
        question: &str,
        hint: &str,
        what: &'static str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        self.say(question)?;
        loop {
            let answer = self.read_answer(what)?;
            if let Some(value) = accept(&answer) {
                return Ok(value);
            }
            debug!("rejected {what} {answer:?}");
            self.say(hint)?;
        }
    }

    /// Read one line without its terminator.
    fn read_answer(&mut self, what: &'static str) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput { what });
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}
