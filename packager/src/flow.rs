//! Console session driving one packaging run.
//!
//! A session moves through the stages in [`Stage`]: it gathers the source
//! folder, output folder and version (from the command line, or by
//! prompting), validates them, generates the distribution and reports the
//! outcome. Any failure ends the session in [`Stage::Failed`].

use crate::cli::Cli;
use crate::error::ValidationError;
use crate::layout::TITLE;
use crate::packaging_error::{EXIT_SUCCESS, Result};
use crate::pipeline::{PackageRequest, PackageSummary, package};
use crate::prompt::Prompter;
use crate::version_label::VersionLabel;
use log::debug;
use std::io::{BufRead, Write};

/// Status line printed before generation starts.
pub const GENERATING: &str = "Generating package files...";

/// Status line printed after a successful run.
pub const COMPLETED: &str = "Operation has completed!";

/// Stages of a packaging session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for the source folder.
    AwaitingSourcePath,
    /// Waiting for the output folder.
    AwaitingOutputPath,
    /// Waiting for the version label.
    AwaitingVersion,
    /// Checking folders and version before anything is written.
    Validating,
    /// Writing archives, manifest and version marker.
    Generating,
    /// The distribution is complete.
    Done,
    /// The session was aborted.
    Failed,
}

fn enter(stage: Stage) {
    debug!("stage: {stage:?}");
}

/// Run one session, reading answers from `input` and writing to `output`.
///
/// # Errors
///
/// Returns a validation error if an input is rejected (nothing is written
/// then), or a generation error if the run aborts part-way.
pub fn run<R: BufRead, W: Write>(
    cli: &Cli,
    input: R,
    output: &mut W,
) -> Result<PackageSummary> {
    let chatty = !(cli.quiet || cli.json);
    let mut console = Prompter::new(input, &mut *output);
    if chatty {
        console.say(TITLE)?;
    }

    enter(Stage::AwaitingSourcePath);
    let source = match &cli.source {
        Some(path) => path.clone(),
        None => {
            ensure_prompting(cli, "source folder")?;
            console.source_folder()?
        }
    };

    enter(Stage::AwaitingOutputPath);
    let destination = match &cli.output {
        Some(path) => path.clone(),
        None => {
            ensure_prompting(cli, "output folder")?;
            console.output_folder()?
        }
    };

    enter(Stage::AwaitingVersion);
    let version = match &cli.release {
        Some(text) => VersionLabel::try_from(text.as_str())?,
        None => {
            ensure_prompting(cli, "version number")?;
            console.version()?
        }
    };

    enter(Stage::Validating);
    let request = PackageRequest::validate(&source, &destination, version.as_str())?
        .with_order(cli.entry_order());

    enter(Stage::Generating);
    if chatty {
        console.say(GENERATING)?;
    }
    let summary = package(&request)?;

    enter(Stage::Done);
    if cli.json {
        console.say(&serde_json::to_string_pretty(&summary)?)?;
    } else if chatty {
        console.say(COMPLETED)?;
    }
    Ok(summary)
}

fn ensure_prompting(cli: &Cli, what: &'static str) -> std::result::Result<(), ValidationError> {
    if cli.no_prompt {
        Err(ValidationError::MissingInput { what })
    } else {
        Ok(())
    }
}

/// Print the outcome of a session and return the process exit code.
///
/// Error messages go to `output`, the same stream as the status lines.
pub fn exit_code_for_run_result<T>(result: Result<T>, output: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => {
            enter(Stage::Failed);
            if let Err(write_err) = writeln!(output, "{err}") {
                debug!("could not report failure: {write_err}");
            }
            err.exit_code()
        }
    }
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
