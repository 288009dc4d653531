//! Implementation of `pomona tags`.

use std::process::ExitCode;

use pomona_config::OutputFormat;
use pomona_highlight::{chip, cursor_mark};
use pomona_index::{Filter, search};
use pomona_session::TagSession;
use tracing::debug;

use crate::cli::{
    args::TagsCommand,
    context::CommandContext,
    output::{RecordOutput, dim, print_outcome, subheader},
};

/// Applies the command's tag operations: appends, removals, edits, inserts, then cursor moves.
///
/// Returns the session and the text of every tag taken out for editing.
fn build_session(cmd: &TagsCommand) -> (TagSession, Vec<String>) {
    let mut session = TagSession::new();
    for tag in &cmd.tags {
        if !session.append(tag) {
            eprintln!("warning: ignored empty or duplicate tag '{tag}'");
        }
    }
    for &index in &cmd.remove {
        if session.remove_at(index).is_none() {
            eprintln!("warning: no tag at index {index} to remove");
        }
    }
    let mut editing = Vec::new();
    for &index in &cmd.edit {
        match session.edit_at(index) {
            Some(text) => editing.push(text),
            None => eprintln!("warning: no tag at index {index} to edit"),
        }
    }
    for insertion in &cmd.insert_at {
        if !session.insert_at(&insertion.text, insertion.position) {
            eprintln!(
                "warning: ignored empty or duplicate tag '{}'",
                insertion.text
            );
        }
    }
    for &delta in &cmd.moves {
        session.move_cursor(delta);
    }
    debug!(tags = session.len(), cursor = ?session.cursor(), "built tag session");
    (session, editing)
}

/// Renders tags as chips with the cursor marker at its slot.
fn format_session(session: &TagSession) -> String {
    let mut parts = Vec::with_capacity(session.len() + 1);
    for (index, tag) in session.tags().iter().enumerate() {
        if session.cursor() == Some(index) {
            parts.push(cursor_mark());
        }
        parts.push(chip(tag));
    }
    if session.cursor() == Some(session.len()) {
        parts.push(cursor_mark());
    }
    parts.join(" ")
}

/// Prints the session state and the effective filter.
fn print_session(session: &TagSession, editing: &[String], filter: &Filter) {
    println!("{}", subheader("Tags:"));
    if session.is_empty() && session.cursor().is_none() {
        println!("   {}", dim("(none)"));
    } else {
        println!("   {}", format_session(session));
    }
    for text in editing {
        println!("   {}", dim(&format!("editing: {text}")));
    }
    println!();

    println!("{}", subheader("Query:"));
    match filter {
        Filter::All => println!("   {}", dim("(no filter: every record)")),
        Filter::Query(query) => {
            for line in query.to_string().lines() {
                println!("   {line}");
            }
        }
    }
    println!();
}

/// Builds a query from tags and prints the matches.
pub fn run(ctx: &CommandContext, cmd: &TagsCommand) -> ExitCode {
    let (session, editing) = build_session(cmd);
    let mode = cmd.mode.unwrap_or(ctx.config.search.default_mode);
    let filter = session.derive_query_with(mode);

    let output = RecordOutput::resolve(
        &cmd.output,
        ctx.config.output.format,
        ctx.config.output.limit,
    );
    if output.format != OutputFormat::Json {
        print_session(&session, &editing, &filter);
    }

    let records = match ctx.records() {
        Ok(records) => records,
        Err(code) => return code,
    };
    print_outcome(&search(Some(&records[..]), &filter), output)
}
