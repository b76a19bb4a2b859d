//! Patch packager CLI entrypoint.
//!
//! This binary asks for (or reads from the command line) a source folder, an
//! empty output folder and a version number, then writes the archives,
//! manifest and version marker. Status lines and errors share stdout; logs go
//! to stderr.

use clap::Parser;
use patch_packager::cli::Cli;
use patch_packager::flow::{exit_code_for_run_result, run};
use std::io;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut stdout = io::stdout().lock();
    let run_result = run(&cli, io::stdin().lock(), &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stdout);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
