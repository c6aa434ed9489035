mod api;
mod cli;
mod clipboard;
mod commands;
mod config;
mod controller;
mod error;
mod error_ext;
mod export;
mod form;
mod history;
mod repl;
mod session;
mod syntax;
mod ui;

use api::GeneratorClient;
use clap::Parser;
use cli::Cli;
use clipboard::SystemClipboard;
use config::DsgenConfig;
use controller::SessionController;
use error::Result;
use error_ext::ResultExt;
use form::Form;
use repl::Repl;
use std::env;
use ui::UI;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let workspace = env::current_dir().context("Failed to get current directory")?;

    let mut config = match DsgenConfig::load(&workspace) {
        Ok(config) => config,
        Err(e) => {
            UI::print_error(&e.to_string());
            std::process::exit(1);
        }
    };
    cli.apply_to(&mut config);
    if let Err(e) = config.validate() {
        UI::print_error_with_hint(&e);
        std::process::exit(1);
    }

    let client = GeneratorClient::new(&config)?;
    tracing::info!(url = client.url(), "Using generator endpoint");

    let mut form = Form::with_fields(config.fields.iter().cloned());
    for (name, value) in &cli.fields {
        form.set(name, value.clone());
    }

    // A one-shot run exits right after copying, so its clipboard has to
    // hold the selection until something reads it.
    let clipboard = if cli.once {
        SystemClipboard::holding_until_pasted()
    } else {
        SystemClipboard::new()
    };

    let mut controller = SessionController::new(
        client,
        clipboard,
        form,
        config.output_dir.clone(),
        config.history_limit,
    );

    if cli.once {
        return run_once(&mut controller, &cli).await;
    }

    let mut repl = Repl::new(controller, config.endpoint.clone());
    repl.run().await
}

/// Non-interactive mode: the payload goes to stdout, everything else to stderr.
async fn run_once(controller: &mut SessionController<SystemClipboard>, cli: &Cli) -> Result<()> {
    let snapshot = controller.form().snapshot();
    if let Err(e) = controller.generate(&snapshot).await {
        UI::print_error_with_hint(&e);
        std::process::exit(1);
    }

    println!("{}", controller.preview().text);

    if cli.export {
        match controller.export_current_as_file() {
            Ok(path) => UI::print_saved(&path),
            Err(e) => {
                UI::print_error_with_hint(&e);
                std::process::exit(1);
            }
        }
    }

    if cli.copy {
        if SystemClipboard::HOLDS_UNTIL_PASTED {
            UI::print_info("Keeping the payload on the clipboard until it is pasted...");
        }
        match controller.copy_current() {
            Ok(()) => UI::print_success("JSON copied to clipboard!"),
            Err(e) => {
                UI::print_error_with_hint(&e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
