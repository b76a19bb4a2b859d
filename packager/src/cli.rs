//! CLI argument definitions for the patch packager.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use crate::pipeline::EntryOrder;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Build a patch distribution from a folder.
#[derive(Parser, Debug, Default)]
#[command(name = "patch-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build a patch distribution from a folder.\n\n",
    "Every file under the source folder is hashed with SHA-256 and wrapped in ",
    "its own zip archive under <output>/zips, mirroring the source tree. The ",
    "output folder also receives filelist.txt (one \"<sha256>\\t<path>\" line ",
    "per file) and version.txt, both UTF-16 encoded.\n\n",
    "Values not given on the command line are asked for interactively unless ",
    "--no-prompt is set.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package a build folder as version 42:\n",
    "    $ patch-packager --source build/ --output dist/ --release 42\n\n",
    "  Produce a reproducible manifest and a JSON summary:\n",
    "    $ patch-packager -s build/ -o dist/ -r 42 --sorted --json\n\n",
    "  Answer the questions interactively:\n",
    "    $ patch-packager\n\n",
    "EXIT STATUS:\n",
    "  0  the distribution was written\n",
    "  1  generation failed part-way\n",
    "  2  an input was rejected; nothing was written",
))]
pub struct Cli {
    /// Folder whose files are packaged; must not be empty.
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<Utf8PathBuf>,

    /// Folder receiving the distribution; must exist and be empty.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<Utf8PathBuf>,

    /// Integer version label written to version.txt.
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub release: Option<String>,

    /// Sort manifest lines by relative path instead of traversal order.
    #[arg(long)]
    pub sorted: bool,

    /// Fail instead of asking for missing values.
    #[arg(long)]
    pub no_prompt: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress status lines (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Return the manifest order requested on the command line.
    #[must_use]
    pub const fn entry_order(&self) -> EntryOrder {
        if self.sorted {
            EntryOrder::Sorted
        } else {
            EntryOrder::Traversal
        }
    }

    /// Return the log level implied by `-v` and `-q`.
    ///
    /// `RUST_LOG` overrides this when set.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
