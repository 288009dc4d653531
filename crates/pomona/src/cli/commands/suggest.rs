//! Implementation of `pomona suggest`.

use std::process::ExitCode;

use pomona_session::Completer;

use crate::cli::{
    args::SuggestCommand,
    context::CommandContext,
    output::{limited, print_json, print_suggestions},
};

/// Prints suggestions for partially typed text, or the input after selecting one.
pub fn run(ctx: &CommandContext, cmd: &SuggestCommand) -> ExitCode {
    let mut completer = Completer::new();
    completer.set_input(cmd.text.as_str());

    if let Some(index) = cmd.select {
        let available = completer.items().len();
        return match completer.select(index) {
            Some(input) => {
                println!("{input}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("error: no suggestion at index {index} ({available} available)");
                ExitCode::FAILURE
            }
        };
    }

    let limit = cmd.limit.unwrap_or(ctx.config.suggest.limit);
    if cmd.json {
        return print_json(&limited(completer.items(), limit));
    }
    print_suggestions(completer.items(), limit);
    ExitCode::SUCCESS
}
