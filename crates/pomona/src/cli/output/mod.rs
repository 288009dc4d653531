//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use pomona_config::OutputFormat;
pub use pomona_highlight::{dim, header, subheader, warning};
use pomona_highlight::{label, rule};
use pomona_index::{Record, SearchOutcome};
use pomona_query::{Field, Query, RawQuery};
use pomona_session::{SuggestionItem, SuggestionKind};
use serde::Serialize;

use crate::cli::args::RecordOutputArgs;

/// Width of the field label column in cards.
const LABEL_WIDTH: usize = 15;

/// Message printed when a filter selected nothing.
pub const NO_MATCHES: &str = "No fruit found.";

/// Resolved printing options for one command.
#[derive(Debug, Clone, Copy)]
pub struct RecordOutput {
    /// Output format.
    pub format: OutputFormat,
    /// Maximum printed records, 0 for no limit.
    pub limit: usize,
}

impl RecordOutput {
    /// Combines command-line flags with configured defaults.
    pub fn resolve(args: &RecordOutputArgs, format: OutputFormat, limit: usize) -> Self {
        let format = if args.json {
            OutputFormat::Json
        } else if args.table {
            OutputFormat::Table
        } else {
            format
        };
        Self {
            format,
            limit: args.limit.unwrap_or(limit),
        }
    }
}

/// Applies a "0 means unlimited" limit.
pub fn limited<T>(items: &[T], limit: usize) -> &[T] {
    if limit == 0 || limit >= items.len() {
        items
    } else {
        &items[..limit]
    }
}

/// JSON document for a search outcome.
#[derive(Serialize)]
struct JsonRecords<'a> {
    /// `unfiltered` or `matches`.
    status: &'static str,
    /// Number of records before the print limit.
    total: usize,
    /// Printed records.
    records: &'a [&'a Record],
}

/// Prints a search outcome in the requested format.
pub fn print_outcome(outcome: &SearchOutcome<'_>, output: RecordOutput) -> ExitCode {
    let status = match outcome {
        SearchOutcome::Pending => return ExitCode::SUCCESS,
        SearchOutcome::Unfiltered(_) => "unfiltered",
        SearchOutcome::Matches(_) => "matches",
    };
    let records = outcome.records();
    let shown = limited(&records, output.limit);

    if output.format == OutputFormat::Json {
        let doc = JsonRecords {
            status,
            total: records.len(),
            records: shown,
        };
        return print_json(&doc);
    }

    if outcome.is_no_match() {
        println!("{}", dim(NO_MATCHES));
        return ExitCode::SUCCESS;
    }

    match output.format {
        OutputFormat::Table => println!("{}", records_table(shown)),
        OutputFormat::Cards | OutputFormat::Json => {
            for record in shown {
                print!("{}", format_card(record));
                println!();
            }
        }
    }

    if shown.len() < records.len() {
        println!(
            "{}",
            dim(&format!("({} of {} shown)", shown.len(), records.len()))
        );
    }
    ExitCode::SUCCESS
}

/// Serializes `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats one record as a card: name header, then every present field.
fn format_card(record: &Record) -> String {
    let mut out = format!("{}\n", header(record.display_name()));
    for field in Field::ALL.into_iter().skip(1) {
        let value = record.field(field);
        if value.is_absent() {
            continue;
        }
        out.push_str(&format!(
            "  {}{}\n",
            label(field.label(), LABEL_WIDTH),
            value.as_text()
        ));
    }
    out
}

/// Builds a table with one row per record.
fn records_table(records: &[&Record]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(Field::ALL.map(Field::label));
    for record in records {
        table.add_row(Field::ALL.map(|field| {
            let cell = Cell::new(record.field(field).as_text());
            if field.is_numeric() {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        }));
    }
    table
}

/// Prints how text was split into terms and how each term was parsed.
pub fn print_explain(raw: &RawQuery, query: &Query) {
    println!("{}", subheader("Mode:"));
    println!("   {}", raw.mode);
    println!();

    println!("{}", subheader("Terms:"));
    if raw.terms.is_empty() {
        println!("   {}", dim("(none: selects nothing)"));
    }
    for (term, predicate) in raw.terms.iter().zip(&query.terms) {
        println!("   {term:<30} {}", dim(&format!("=> {predicate}")));
    }
    println!();

    println!("{}", subheader("Canonical form:"));
    println!("   {}", raw.to_query_string());
}

/// Prints suggestion items as an aligned list.
pub fn print_suggestions(items: &[SuggestionItem], limit: usize) {
    let shown = limited(items, limit);
    if shown.is_empty() {
        println!("{}", dim("No suggestions."));
        return;
    }
    let width = shown.iter().map(|i| i.label.len()).max().unwrap_or(0);
    for (index, item) in shown.iter().enumerate() {
        println!(
            "{index:>2}  {:<width$}  {}",
            item.label,
            dim(&format!("{} ({})", item.value, kind_name(item))),
        );
    }
}

/// Human-readable suggestion kind.
fn kind_name(item: &SuggestionItem) -> &'static str {
    match item.kind {
        SuggestionKind::FieldName => "field",
        SuggestionKind::TextModifier => "modifier",
        SuggestionKind::NumericModifier => "operator",
    }
}

/// Prints a horizontal separator.
pub fn print_rule() {
    println!("{}", rule(40));
}

#[cfg(test)]
mod tests {
    use pomona_index::{RecordSource, StaticSource};

    use super::*;

    fn apple() -> Record {
        StaticSource::from_json(
            r#"[{"name": "Apple", "family": "Rosaceae", "nutritions": {"calories": 52}}]"#,
        )
        .unwrap()
        .records()
        .unwrap()[0]
            .clone()
    }

    #[test]
    fn flags_override_configured_format() {
        let args = RecordOutputArgs {
            table: true,
            ..Default::default()
        };
        let output = RecordOutput::resolve(&args, OutputFormat::Cards, 5);
        assert_eq!(output.format, OutputFormat::Table);
        assert_eq!(output.limit, 5);

        let args = RecordOutputArgs {
            json: true,
            limit: Some(0),
            ..Default::default()
        };
        let output = RecordOutput::resolve(&args, OutputFormat::Table, 5);
        assert_eq!(output.format, OutputFormat::Json);
        assert_eq!(output.limit, 0);
    }

    #[test]
    fn zero_limit_keeps_everything() {
        assert_eq!(limited(&[1, 2, 3], 0), &[1, 2, 3]);
        assert_eq!(limited(&[1, 2, 3], 2), &[1, 2]);
        assert_eq!(limited(&[1, 2, 3], 7), &[1, 2, 3]);
    }

    #[test]
    fn card_skips_absent_fields() {
        let card = format_card(&apple());
        assert!(card.contains("Apple"));
        assert!(card.contains("Rosaceae"));
        assert!(card.contains("52"));
        assert!(!card.contains("Genus"));
        assert!(!card.contains("Sugar"));
    }

    #[test]
    fn table_has_a_column_per_field() {
        let apple = apple();
        let table = records_table(&[&apple]).to_string();
        assert!(table.contains("Carbohydrates"));
        assert!(table.contains("Rosaceae"));
    }
}
