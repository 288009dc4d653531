//! CLI integration tests for pomona commands.
//!
//! These run the binary against the bundled sample collection or a record file written into a
//! temporary directory, with `HOME` pointed at that directory so no user configuration leaks in.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a pomona command.
fn pomona() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("pomona").unwrap()
}

/// Helper to run `pomona` inside `dir` with HOME isolated to it.
fn pomona_in(dir: &Path) -> Command {
    let mut cmd = pomona();
    cmd.env("HOME", dir).env_remove("POMONA_LOG").current_dir(dir);
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Runs the command, asserts success, and returns plain stdout.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    strip_ansi(&String::from_utf8(output).unwrap())
}

/// Runs the command with `--json` output and returns the printed record names.
fn json_names(cmd: &mut Command) -> Vec<String> {
    let output = cmd.arg("--json").assert().success().get_output().stdout.clone();
    let doc: Value = serde_json::from_slice(&output).unwrap();
    doc["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

/// A small record file in the published fruit format.
const BERRIES: &str = r#"[
  {"name": "Raspberry", "family": "Rosaceae", "order": "Rosales", "genus": "Rubus",
   "nutritions": {"calories": 52, "sugar": 4.4, "carbohydrates": 12, "protein": 1.2, "fat": 0.7}},
  {"name": "Gooseberry", "family": "Grossulariaceae", "order": "Saxifragales", "genus": "Ribes",
   "nutritions": {"calories": 44, "sugar": "n/a"}, "id": 19}
]"#;

mod search {
    use super::*;

    #[test]
    fn unscoped_text_matches_any_text_field() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).args(["search", "apple"]));
        assert_eq!(names, vec!["Apple", "Pineapple"]);
    }

    #[test]
    fn plain_tokens_default_to_or() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).args(["search", "apple", "pear"]));
        assert_eq!(names, vec!["Apple", "Pear", "Pineapple"]);
    }

    #[test]
    fn and_separator_requires_every_term() {
        let dir = temp_dir();
        let names = json_names(
            pomona_in(dir.path()).args(["search", "family: rosaceae && calories: >= 50"]),
        );
        assert_eq!(names, vec!["Apple", "Cherry", "Pear"]);
    }

    #[test]
    fn prefix_modifier_on_name() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).args(["search", "name: starts with: a"]));
        assert_eq!(names, vec!["Apple", "Apricot", "Avocado"]);
    }

    #[test]
    fn numeric_upper_bound() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).args(["search", "calories: <= 29"]));
        assert_eq!(names, vec!["Blueberry", "Lemon", "Strawberry"]);
    }

    #[test]
    fn mode_flag_changes_default() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["search", "--mode", "and", "apple", "pear"]));
        assert!(stdout.contains("No fruit found."));
    }

    #[test]
    fn cards_show_fields() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["search", "name: kiwi"]));
        assert!(stdout.contains("Kiwi"));
        assert!(stdout.contains("Actinidiaceae"));
        assert!(stdout.contains("Calories"));
        assert!(stdout.contains("61"));
    }

    #[test]
    fn table_output() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["search", "--table", "genus: citrus"]));
        assert!(stdout.contains("Lemon"));
        assert!(stdout.contains("Orange"));
        assert!(stdout.contains("Genus"));
    }

    #[test]
    fn limit_truncates_output() {
        let dir = temp_dir();
        let output = pomona_in(dir.path())
            .args(["search", "--json", "-n", "1", "apple"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let doc: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(doc["total"], 2);
        assert_eq!(doc["records"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn incomplete_text_is_not_evaluated() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["search", "calories:"]));
        assert!(stdout.contains("incomplete"));
        assert!(stdout.contains(">= (at least)"));
        assert!(!stdout.contains("Apple"));
    }

    #[test]
    fn incomplete_trailing_term_is_not_evaluated() {
        let dir = temp_dir();
        let output = pomona_in(dir.path())
            .args(["search", "--json", "family: rosaceae && name: starts with:"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let doc: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(doc["status"], "incomplete");
        assert_eq!(doc["term"], "name: starts with:");
    }

    #[test]
    fn force_evaluates_incomplete_text() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).args(["search", "--force", "name:"]));
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn empty_text_lists_everything() {
        let dir = temp_dir();
        let output = pomona_in(dir.path())
            .args(["search", "--json", ""])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let doc: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(doc["status"], "unfiltered");
        assert_eq!(doc["total"], 14);
    }

    #[test]
    fn explain_shows_parsed_terms() {
        let dir = temp_dir();
        let stdout = stdout_of(
            pomona_in(dir.path()).args(["search", "--explain", "apple && calories: >= 50"]),
        );
        assert!(stdout.contains("and"));
        assert!(stdout.contains("Field(calories) >= 50"));
        assert!(stdout.contains("apple && calories: >= 50"));
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let dir = temp_dir();
        pomona_in(dir.path())
            .args(["search", "--mode", "xor", "apple"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("hint: Valid modes are: and, or"));
    }

    #[test]
    fn unknown_qualifier_is_evaluated_as_text() {
        let dir = temp_dir();
        let output = pomona_in(dir.path())
            .args(["search", "--json", "colour:"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let doc: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(doc["status"], "matches");
        assert_eq!(doc["total"], 0);
    }

    #[test]
    fn operator_on_text_field_is_evaluated() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["search", "name: >="]));
        assert!(stdout.contains("No fruit found."));
        assert!(!stdout.contains("incomplete"));
    }
}

mod tags {
    use super::*;

    #[test]
    fn no_tags_is_unfiltered() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).arg("tags"));
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn tags_combine_with_or() {
        let dir = temp_dir();
        let names = json_names(pomona_in(dir.path()).args(["tags", "name: kiwi", "name: lemon"]));
        assert_eq!(names, vec!["Kiwi", "Lemon"]);
    }

    #[test]
    fn and_tag_switches_mode() {
        let dir = temp_dir();
        let names = json_names(
            pomona_in(dir.path()).args(["tags", "family: rosaceae", "&&", "sugar: >= 10"]),
        );
        assert_eq!(names, vec!["Apple", "Pear"]);
    }

    #[test]
    fn shows_session_and_editing() {
        let dir = temp_dir();
        let stdout = stdout_of(
            pomona_in(dir.path()).args(["tags", "name: kiwi", "name: pear", "--edit", "1"]),
        );
        assert!(stdout.contains("[name: kiwi]"));
        assert!(!stdout.contains("[name: pear]"));
        assert!(stdout.contains("editing: name: pear"));
        assert!(stdout.contains("Kiwi"));
    }

    #[test]
    fn only_separators_select_nothing() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["tags", "&&"]));
        assert!(stdout.contains("No fruit found."));
    }
}

mod suggest {
    use super::*;

    #[test]
    fn lists_fields() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["suggest", "ca"]));
        assert!(stdout.contains("Calories"));
        assert!(stdout.contains("Carbohydrates"));
        assert!(!stdout.contains("Family"));
    }

    #[test]
    fn json_items() {
        let dir = temp_dir();
        let output = pomona_in(dir.path())
            .args(["suggest", "--json", "name: "])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let items: Value = serde_json::from_slice(&output).unwrap();
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["value"], "starts with:");
        assert_eq!(items[0]["kind"], "text_modifier");
    }

    #[test]
    fn select_rewrites_input() {
        let dir = temp_dir();
        pomona_in(dir.path())
            .args(["suggest", "--select", "0", "name: st"])
            .assert()
            .success()
            .stdout("name:starts with: \n");
    }

    #[test]
    fn select_out_of_range_fails() {
        let dir = temp_dir();
        pomona_in(dir.path())
            .args(["suggest", "--select", "9", "cal"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no suggestion at index 9"));
    }

    #[test]
    fn diverged_text_has_no_suggestions() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).args(["suggest", "name: kiwi"]));
        assert!(stdout.contains("No suggestions."));
    }
}

mod check {
    use super::*;

    #[test]
    fn complete_succeeds() {
        pomona()
            .args(["check", "name: kiwi"])
            .assert()
            .success()
            .stdout("complete\n");
    }

    #[test]
    fn incomplete_fails() {
        pomona()
            .args(["check", "calories: >="])
            .assert()
            .failure()
            .stdout("incomplete\n");
    }

    #[test]
    fn empty_fails() {
        pomona().arg("check").assert().failure().stdout("empty\n");
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();
        let work = dir.path().join("work");
        fs::create_dir(&work).unwrap();

        let stdout = stdout_of(
            pomona()
                .env("HOME", dir.path())
                .current_dir(&work)
                .arg("init"),
        );
        assert!(stdout.contains("Records:"));
        assert!(stdout.contains("bundled sample"));

        let contents = fs::read_to_string(work.join(".pomona.toml")).unwrap();
        assert!(contents.contains("# [search]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".pomona.toml"), "existing").unwrap();

        pomona_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_invalid_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".pomona.toml"), "not = [valid").unwrap();

        pomona_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }
}

mod data {
    use super::*;

    #[test]
    fn data_flag_replaces_sample() {
        let dir = temp_dir();
        fs::write(dir.path().join("berries.json"), BERRIES).unwrap();

        let names = json_names(
            pomona_in(dir.path()).args(["--data", "berries.json", "search", "berry"]),
        );
        assert_eq!(names, vec!["Raspberry", "Gooseberry"]);
    }

    #[test]
    fn unreadable_nutrition_never_compares() {
        let dir = temp_dir();
        fs::write(dir.path().join("berries.json"), BERRIES).unwrap();

        let names = json_names(
            pomona_in(dir.path()).args(["--data", "berries.json", "search", "sugar: >= 0"]),
        );
        assert_eq!(names, vec!["Raspberry"]);
    }

    #[test]
    fn configured_data_path() {
        let dir = temp_dir();
        fs::write(dir.path().join("berries.json"), BERRIES).unwrap();
        fs::write(
            dir.path().join(".pomona.toml"),
            "[data]\npath = \"berries.json\"\n[search]\ndefault_mode = \"and\"\n",
        )
        .unwrap();

        let names = json_names(pomona_in(dir.path()).args(["search", "rosaceae", "rubus"]));
        assert_eq!(names, vec!["Raspberry"]);
    }

    #[test]
    fn missing_data_file_fails() {
        let dir = temp_dir();
        pomona_in(dir.path())
            .args(["--data", "missing.json", "search", "apple"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn malformed_data_file_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("bad.json"), "{\"name\": ").unwrap();
        pomona_in(dir.path())
            .args(["--data", "bad.json", "search", "apple"])
            .assert()
            .failure();
    }
}

mod config {
    use super::*;

    #[test]
    fn without_files() {
        let dir = temp_dir();
        let stdout = stdout_of(pomona_in(dir.path()).arg("config"));
        assert!(stdout.contains("No configuration files found."));
        assert!(stdout.contains("bundled sample"));
        assert!(stdout.contains("default_mode = \"or\""));
    }

    #[test]
    fn shows_merged_settings_and_warnings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".pomona.toml"),
            "[data]\npath = \"nowhere.json\"\n[output]\nformat = \"table\"\n",
        )
        .unwrap();

        let stdout = stdout_of(pomona_in(dir.path()).arg("config"));
        assert!(stdout.contains(".pomona.toml"));
        assert!(stdout.contains("format = \"table\""));
        assert!(stdout.contains("data file does not exist"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".pomona.toml"), "[search]\ndefault_mode = \"xor\"\n").unwrap();

        pomona_in(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("default_mode"))
            .stderr(predicate::str::contains("hint: Valid modes are: and, or"));
    }
}
