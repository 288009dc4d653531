//! Implementation of `pomona config`.

use std::process::ExitCode;

use pomona_config::{discover_config_files, is_global_config};
use pomona_highlight::Highlighter;

use crate::cli::{
    context::CommandContext,
    output::{dim, header, print_rule, subheader, warning},
};

/// Shows configuration files, the data source and the effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let config_files = discover_config_files(&ctx.cwd);

    println!("{}", header("Configuration"));
    println!();

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!("Run 'pomona init' to create a configuration file.");
    } else {
        println!("{}", subheader("Config files (highest precedence first):"));
        for path in &config_files {
            if is_global_config(path) {
                println!("  {} {}", path.display(), dim("(global)"));
            } else {
                println!("  {}", path.display());
            }
        }
    }
    println!();

    println!("{}", subheader("Data:"));
    println!("  {}", ctx.data_description());
    println!();

    println!("{}", subheader("Effective settings:"));
    print_rule();
    let highlighter = Highlighter::new();
    print!("{}", highlighter.highlight_toml(&config.settings_to_toml()));
    print_rule();

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!();
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for item in &warnings {
            println!("  - {}", warning(&item.to_string()));
        }
    }

    ExitCode::SUCCESS
}
