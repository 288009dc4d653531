//! Implementation of `pomona search`.

use std::process::ExitCode;

use pomona_index::{Filter, search};
use pomona_query::{Completeness, completeness, parse_query_with, split_query_with};
use pomona_session::{SuggestionItem, suggestions};
use serde::Serialize;
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{
        RecordOutput, dim, limited, print_explain, print_json, print_outcome, print_suggestions,
        subheader, warning,
    },
};

/// JSON document printed instead of results for text that is not ready.
#[derive(Serialize)]
struct JsonIncomplete<'a> {
    /// Always `incomplete`.
    status: &'static str,
    /// The term still waiting for a value.
    term: &'a str,
    /// What could come next.
    suggestions: &'a [SuggestionItem],
}

/// Returns the term being typed: the last one after splitting, or the whole text.
fn trailing_term(text: &str, raw_terms: &[String]) -> String {
    raw_terms
        .last()
        .cloned()
        .unwrap_or_else(|| text.trim().to_string())
}

/// Searches the collection and prints the matches.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let text = cmd.text.join(" ");
    let mode = cmd.mode.unwrap_or(ctx.config.search.default_mode);
    let raw = split_query_with(&text, mode);
    debug!(%text, %mode, terms = raw.terms.len(), "search");

    if cmd.explain {
        print_explain(&raw, &parse_query_with(&text, mode));
        return ExitCode::SUCCESS;
    }

    let output = RecordOutput::resolve(
        &cmd.output,
        ctx.config.output.format,
        ctx.config.output.limit,
    );

    let filter = if text.trim().is_empty() {
        Filter::All
    } else {
        let term = trailing_term(&text, &raw.terms);
        let gate = ctx.config.search.require_complete && !cmd.force;
        if gate && completeness(&term) == Completeness::Incomplete {
            return print_incomplete(ctx, &term, cmd.output.json);
        }
        Filter::Query(parse_query_with(&text, mode))
    };

    let records = match ctx.records() {
        Ok(records) => records,
        Err(code) => return code,
    };
    let outcome = search(Some(&records[..]), &filter);
    print_outcome(&outcome, output)
}

/// Explains why nothing was evaluated and shows what could come next.
fn print_incomplete(ctx: &CommandContext, term: &str, json: bool) -> ExitCode {
    let items = suggestions(term);
    let items = limited(&items, ctx.config.suggest.limit);
    if json {
        return print_json(&JsonIncomplete {
            status: "incomplete",
            term,
            suggestions: items,
        });
    }

    println!(
        "{}",
        warning(&format!("Query is incomplete: '{term}' is waiting for a value."))
    );
    println!("{}", dim("Finish the term, or pass --force to search anyway."));
    if !items.is_empty() {
        println!();
        println!("{}", subheader("Suggestions:"));
        print_suggestions(items, 0);
    }
    ExitCode::SUCCESS
}
