//! Syntax highlighting and terminal colors for pomona.
//!
//! Highlights configuration for display, and styles the pieces of CLI output: headers,
//! record fields, tag chips and warnings.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML.
    syntax_set: SyntaxSet,
    /// Available color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights content with the named syntax, falling back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text (warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Magenta text (tag chips).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Reverse video (the chip under the cursor).
    pub const REVERSE: &str = "\x1b[7m";
    /// Dim text (secondary info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `codes` followed by a reset.
fn styled(codes: &[&str], text: &str) -> String {
    format!("{}{text}{}", codes.concat(), colors::RESET)
}

/// Formats a header in bold cyan.
pub fn header(text: &str) -> String {
    styled(&[colors::BOLD, colors::CYAN], text)
}

/// Formats a subheader in bold.
pub fn subheader(text: &str) -> String {
    styled(&[colors::BOLD], text)
}

/// Formats secondary text.
pub fn dim(text: &str) -> String {
    styled(&[colors::DIM], text)
}

/// Formats a warning in yellow.
pub fn warning(text: &str) -> String {
    styled(&[colors::YELLOW], text)
}

/// Formats a record field label, padded to `width` before styling.
pub fn label(text: &str, width: usize) -> String {
    dim(&format!("{text:<width$}"))
}

/// Formats a committed tag as a chip.
pub fn chip(text: &str) -> String {
    styled(&[colors::MAGENTA], &format!("[{text}]"))
}

/// The insertion cursor drawn between chips.
pub fn cursor_mark() -> String {
    styled(&[colors::BOLD, colors::REVERSE], "|")
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_is_highlighted() {
        let output = Highlighter::new().highlight_toml("[search]\ndefault_mode = \"or\"\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
        assert!(output.contains("default_mode"));
    }

    #[test]
    fn unknown_syntax_falls_back_to_plain_text() {
        let output = Highlighter::new().highlight("just text\n", "no-such-syntax");
        assert!(output.contains("just text"));
    }

    #[test]
    fn header_is_bold_cyan() {
        let h = header("Apple");
        assert!(h.starts_with(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
        assert!(h.contains("Apple"));
    }

    #[test]
    fn label_pads_before_styling() {
        assert_eq!(label("Fat", 6), format!("{}Fat   {}", colors::DIM, colors::RESET));
    }

    #[test]
    fn chip_brackets_text() {
        assert!(chip("name: kiwi").contains("[name: kiwi]"));
        assert!(cursor_mark().contains('|'));
    }

    #[test]
    fn rule_has_requested_width() {
        assert_eq!(rule(4).matches('─').count(), 4);
    }

    #[test]
    fn toml_syntax_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
    }
}
