use crate::clipboard::Clipboard;
use crate::commands::{Command, CommandResult, ParseError};
use crate::controller::SessionController;
use crate::error::Result;
use crate::ui::UI;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads commands line by line and dispatches them to the controller.
pub struct Repl<C: Clipboard> {
    pub(crate) controller: SessionController<C>,
    pub(crate) ui: UI,
    endpoint: String,
}

impl<C: Clipboard> Repl<C> {
    pub fn new(controller: SessionController<C>, endpoint: String) -> Self {
        Self {
            controller,
            ui: UI::new(),
            endpoint,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        UI::print_welcome(&self.endpoint);
        UI::display_form(self.controller.form());
        println!();
        self.ui.display_preview(self.controller.preview());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{} ", "dsgen>".bright_green().bold());
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                // EOF (Ctrl-D)
                println!();
                UI::print_goodbye();
                break;
            };

            if self.handle_line(&line).await? == CommandResult::Exit {
                break;
            }
        }

        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<CommandResult> {
        if line.trim().is_empty() {
            return Ok(CommandResult::Continue);
        }

        match Command::parse(line) {
            Ok(command) => {
                tracing::debug!(?command, "Dispatching command");
                command.execute(self).await
            }
            Err(ParseError::Usage(usage)) => {
                UI::print_warning(&format!("Usage: {}", usage));
                Ok(CommandResult::Continue)
            }
            Err(ParseError::Unknown(name)) => {
                UI::print_warning(&format!("Unknown command '{}'. Type 'help' for commands.", name));
                Ok(CommandResult::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GeneratorClient;
    use crate::clipboard::MemoryClipboard;
    use crate::config::DsgenConfig;
    use crate::form::Form;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repl_for(server: &MockServer, out: &TempDir) -> Repl<MemoryClipboard> {
        let config = DsgenConfig {
            endpoint: server.uri(),
            ..DsgenConfig::default()
        };
        let controller = SessionController::new(
            GeneratorClient::new(&config).unwrap(),
            MemoryClipboard::default(),
            Form::with_fields(config.fields.iter().cloned()),
            out.path().to_path_buf(),
            config.history_limit,
        );
        Repl::new(controller, config.endpoint)
    }

    #[tokio::test]
    async fn test_set_then_generate_sends_only_filled_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({ "gender": "FEMALE", "role": "MAIN" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "applicants": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let out = TempDir::new().unwrap();
        let mut repl = repl_for(&server, &out);

        for line in ["set role MAIN", "/set gender FEMALE", "set maritalStatus", "generate"] {
            assert_eq!(repl.handle_line(line).await.unwrap(), CommandResult::Continue);
        }
        assert_eq!(repl.controller.history().len(), 1);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_session() {
        let server = MockServer::start().await;
        let out = TempDir::new().unwrap();
        let mut repl = repl_for(&server, &out);

        for line in ["copy", "export", "history", "csv", "unset nothing", "bogus", "unset", ""] {
            assert_eq!(repl.handle_line(line).await.unwrap(), CommandResult::Continue);
        }
        // No mock mounted: the server answers 404.
        assert_eq!(repl.handle_line("generate").await.unwrap(), CommandResult::Continue);
        assert!(repl.controller.preview().text.contains("404"));
    }

    #[tokio::test]
    async fn test_exit_command() {
        let server = MockServer::start().await;
        let out = TempDir::new().unwrap();
        let mut repl = repl_for(&server, &out);

        assert_eq!(repl.handle_line("quit").await.unwrap(), CommandResult::Exit);
    }
}
