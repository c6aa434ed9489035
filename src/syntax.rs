use colored::Colorize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;

const THEME: &str = "base16-ocean.dark";

pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Highlights a JSON document inside a left gutter.
    pub fn highlight_json(&self, json: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("json")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut result = String::new();
        result.push_str(&format!("{}\n", "┌─────".dimmed()));

        match self.theme_set.themes.get(THEME) {
            Some(theme) => {
                let mut highlighter = HighlightLines::new(syntax, theme);
                for line in json.lines() {
                    let ranges: Vec<(Style, &str)> = highlighter
                        .highlight_line(line, &self.syntax_set)
                        .unwrap_or_default();
                    let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
                    result.push_str(&format!("{}  {}\x1b[0m\n", "│".dimmed(), escaped));
                }
            }
            None => {
                for line in json.lines() {
                    result.push_str(&format!("{}  {}\n", "│".dimmed(), line));
                }
            }
        }

        result.push_str(&format!("{}", "└─────".dimmed()));
        result
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
