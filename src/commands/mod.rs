use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::repl::Repl;

pub mod builtin;

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Continue REPL loop
    Continue,
    /// Exit REPL loop
    Exit,
}

/// Enum representing all available REPL commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate,
    Copy,
    Export,
    New,
    History,
    Csv,
    Set { field: String, value: String },
    Unset { field: String },
    ShowForm,
    Help,
    Exit,
}

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    Usage(&'static str),
}

impl Command {
    /// Parses one input line. A leading `/` is optional.
    pub fn parse(line: &str) -> std::result::Result<Self, ParseError> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "generate" | "gen" | "g" => Ok(Command::Generate),
            "copy" => Ok(Command::Copy),
            "export" => Ok(Command::Export),
            "new" | "reset" => Ok(Command::New),
            "history" => Ok(Command::History),
            "csv" => Ok(Command::Csv),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(ParseError::Usage("set <field> <value>"));
                }
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "unset" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("unset <field>"));
                }
                Ok(Command::Unset {
                    field: rest.to_string(),
                })
            }
            "form" => Ok(Command::ShowForm),
            "help" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(ParseError::Unknown(name.to_string())),
        }
    }

    pub async fn execute<C: Clipboard>(self, repl: &mut Repl<C>) -> Result<CommandResult> {
        match self {
            Command::Generate => builtin::generate_command(repl).await,
            Command::Copy => builtin::copy_command(repl),
            Command::Export => builtin::export_command(repl),
            Command::New => builtin::new_command(repl),
            Command::History => builtin::history_command(repl),
            Command::Csv => builtin::csv_command(repl),
            Command::Set { field, value } => builtin::set_command(repl, &field, value),
            Command::Unset { field } => builtin::unset_command(repl, &field),
            Command::ShowForm => builtin::form_command(repl),
            Command::Help => builtin::help_command(),
            Command::Exit => builtin::exit_command(),
        }
    }
}
