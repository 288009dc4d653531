//! Implementation of `pomona init`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use pomona_config::{
    CONFIG_FILENAME, Config, global_config_path, global_template, local_template,
};
use pomona_highlight::{Highlighter, dim, subheader};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Picks the file to write: the global config when asked for or when run from home.
///
/// Returns `None` if the home directory is needed but unknown.
fn target_path(cwd: &Path, global: bool) -> Option<(PathBuf, bool)> {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(Path::parent)
        .is_some_and(|home| home == cwd);

    if global || in_home {
        global_path.map(|path| (path, true))
    } else {
        Some((cwd.join(CONFIG_FILENAME), false))
    }
}

/// Describes where records would come from with only `path` configured.
fn records_summary(path: &Path) -> String {
    match Config::load_from_files(&[path.to_path_buf()]) {
        Ok(config) if config.data.paths.is_empty() => {
            String::from("bundled sample (set [data] path to search your own records)")
        }
        Ok(config) => config
            .data
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        Err(e) => format!("unreadable: {e}"),
    }
}

/// Writes a commented `.pomona.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let Some((config_path, is_global)) = target_path(&ctx.cwd, cmd.global) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if is_global {
        global_template()
    } else {
        local_template()
    };
    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in Highlighter::new().highlight_toml(&template).lines() {
        println!("   {line}");
    }
    println!();
    println!("{}", subheader("Records:"));
    println!("   {}", dim(&records_summary(&config_path)));

    ExitCode::SUCCESS
}
