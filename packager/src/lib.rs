//! Patch packager library.
//!
//! This crate builds patch-style distributions: every file under a source
//! folder is hashed with SHA-256 and wrapped in its own zip archive, and a
//! UTF-16 manifest plus a version marker describe the result. It backs the
//! `patch-packager` CLI binary and can be driven programmatically through
//! [`pipeline::package`].
//!
//! # Modules
//!
//! - [`archive`] - Single-entry zip archive creation
//! - [`cli`] - Command-line argument definitions
//! - [`digest`] - Streaming SHA-256 hashing and the digest newtype
//! - [`encoding`] - UTF-16LE text encoding for marker files
//! - [`error`] - Input validation errors
//! - [`flow`] - Console session and exit code mapping
//! - [`layout`] - Output folder layout and fixed names
//! - [`manifest`] - Manifest records, rendering and parsing
//! - [`packaging_error`] - Run errors and exit codes
//! - [`pipeline`] - Packaging pipeline orchestration
//! - [`prompt`] - Interactive console prompts
//! - [`roots`] - Validated source and output folders
//! - [`scanner`] - Source tree traversal
//! - [`version_label`] - Integer version label

pub mod archive;
pub mod cli;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod flow;
pub mod layout;
pub mod manifest;
pub mod packaging_error;
pub mod pipeline;
pub mod prompt;
pub mod roots;
pub mod scanner;
pub mod version_label;
