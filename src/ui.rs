use crate::error::DsgenError;
use crate::form::Form;
use crate::session::{Preview, PreviewTone};
use crate::syntax::SyntaxHighlighter;
use colored::Colorize;
use std::path::Path;

/// Message severity levels for consistent UI feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageSeverity {
    /// Recoverable issues, unknown commands
    Warning,
    /// Actual failures (network, IO, clipboard)
    Error,
    Info,
    Success,
}

impl MessageSeverity {
    pub fn prefix(&self) -> colored::ColoredString {
        match self {
            Self::Warning => "Warning:".bright_yellow().bold(),
            Self::Error => "Error:".bright_red().bold(),
            Self::Info => "Info:".bright_cyan().bold(),
            Self::Success => "Success:".bright_green().bold(),
        }
    }
}

/// Terminal rendering for the preview pane and notifications
pub struct UI {
    highlighter: SyntaxHighlighter,
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    pub fn new() -> Self {
        Self {
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn print_message(severity: MessageSeverity, message: &str) {
        eprintln!("{} {}", severity.prefix(), message);
    }

    pub fn print_warning(message: &str) {
        Self::print_message(MessageSeverity::Warning, message);
    }

    pub fn print_error(message: &str) {
        Self::print_message(MessageSeverity::Error, message);
    }

    pub fn print_success(message: &str) {
        Self::print_message(MessageSeverity::Success, message);
    }

    pub fn print_info(message: &str) {
        Self::print_message(MessageSeverity::Info, message);
    }

    pub fn print_hint(hint: &str) {
        eprintln!("  {} {}", "Hint:".bright_cyan(), hint);
    }

    pub fn print_error_with_hint(error: &DsgenError) {
        eprintln!("{} {}", MessageSeverity::Error.prefix(), error);
        if let Some(hint) = error.hint() {
            Self::print_hint(hint);
        }
    }

    pub fn display_preview(&self, preview: &Preview) {
        match preview.tone {
            PreviewTone::Placeholder => println!("{}", preview.text.dimmed()),
            PreviewTone::Json => println!("{}", self.highlighter.highlight_json(&preview.text)),
            PreviewTone::Error => println!("{}", preview.text.bright_red()),
        }
    }

    pub fn display_history_summary(lines: &[String]) {
        println!(
            "{}",
            format!("History ({} items):", lines.len()).bright_cyan().bold()
        );
        println!();
        for line in lines {
            println!("{}", line);
        }
    }

    pub fn display_history_count(count: usize) {
        println!("{}", format!("History: {} item(s)", count).dimmed());
    }

    pub fn display_form(form: &Form) {
        println!("{}", "Form".bright_cyan().bold());
        let width = form.fields().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in form.fields() {
            let shown = if value.is_empty() {
                "(empty)".dimmed().to_string()
            } else {
                value.bright_green().to_string()
            };
            println!("  {:<width$}  {}", name.bright_white(), shown, width = width);
        }
    }

    pub fn print_saved(path: &Path) {
        Self::print_success(&format!("Saved {}", path.display()));
    }

    pub fn print_welcome(endpoint: &str) {
        println!("{}", "dsgen - Digital Sales payload generator".bright_cyan().bold());
        println!("{} {}", "Endpoint:".bright_green(), endpoint);
        println!("{}", "Type 'help' for commands or 'exit' to quit.".dimmed());
        println!();
    }

    pub fn print_help() {
        let rows = [
            ("generate", "Send the form to the generator and preview the payload"),
            ("copy", "Copy the current payload to the clipboard"),
            ("export", "Save the current payload as a JSON file"),
            ("new", "Clear the form and the preview"),
            ("history", "List payloads generated in this session"),
            ("csv", "Save the session history as a CSV file"),
            ("set <field> <value>", "Set a form field"),
            ("unset <field>", "Clear a form field"),
            ("form", "Show the form"),
            ("exit", "Quit"),
        ];
        for (command, description) in rows {
            println!("  {:<22} {}", command.bright_white(), description.dimmed());
        }
    }

    pub fn print_goodbye() {
        println!("{}", "Goodbye!".bright_cyan());
    }
}
