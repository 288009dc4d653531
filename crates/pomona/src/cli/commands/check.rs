//! Implementation of `pomona check`.

use std::process::ExitCode;

use pomona_query::{Completeness, completeness};

use crate::cli::args::CheckCommand;

/// Word printed for each completeness state.
fn describe(state: Completeness) -> &'static str {
    match state {
        Completeness::Empty => "empty",
        Completeness::Incomplete => "incomplete",
        Completeness::Complete => "complete",
    }
}

/// Reports whether text is ready to evaluate. Fails unless it is complete.
pub fn run(cmd: &CheckCommand) -> ExitCode {
    let state = completeness(&cmd.text.join(" "));
    println!("{}", describe(state));
    if state.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
