use super::CommandResult;
use crate::clipboard::Clipboard;
use crate::error::{DsgenError, Result};
use crate::repl::Repl;
use crate::ui::UI;

// Controller failures are reported here and never end the session.

pub async fn generate_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    let snapshot = repl.controller.form().snapshot();
    let outcome = repl.controller.generate(&snapshot).await;
    // The preview already carries the error text.
    repl.ui.display_preview(repl.controller.preview());

    match generation_hint(&outcome) {
        Some(hint) => UI::print_hint(hint),
        None if outcome.is_ok() => UI::display_history_count(repl.controller.history().len()),
        None => {}
    }
    Ok(CommandResult::Continue)
}

/// The follow-up line printed under a failed generation, if any.
fn generation_hint(outcome: &Result<()>) -> Option<&'static str> {
    outcome.as_ref().err().and_then(DsgenError::hint)
}

pub fn copy_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    match repl.controller.copy_current() {
        Ok(()) => UI::print_success("JSON copied to clipboard!"),
        Err(e) => UI::print_error_with_hint(&e),
    }
    Ok(CommandResult::Continue)
}

pub fn export_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    match repl.controller.export_current_as_file() {
        Ok(path) => UI::print_saved(&path),
        Err(e) => UI::print_error_with_hint(&e),
    }
    Ok(CommandResult::Continue)
}

pub fn new_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    repl.controller.reset_form();
    repl.ui.display_preview(repl.controller.preview());
    Ok(CommandResult::Continue)
}

pub fn history_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    match repl.controller.show_history_summary() {
        Ok(lines) => UI::display_history_summary(&lines),
        Err(e) => UI::print_error_with_hint(&e),
    }
    Ok(CommandResult::Continue)
}

pub fn csv_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    match repl.controller.export_history_as_csv() {
        Ok(path) => UI::print_saved(&path),
        Err(e) => UI::print_error_with_hint(&e),
    }
    Ok(CommandResult::Continue)
}

pub fn set_command<C: Clipboard>(
    repl: &mut Repl<C>,
    field: &str,
    value: String,
) -> Result<CommandResult> {
    repl.controller.form_mut().set(field, value);
    Ok(CommandResult::Continue)
}

pub fn unset_command<C: Clipboard>(repl: &mut Repl<C>, field: &str) -> Result<CommandResult> {
    if !repl.controller.form_mut().unset(field) {
        UI::print_warning(&format!("No form field named '{}'", field));
    }
    Ok(CommandResult::Continue)
}

pub fn form_command<C: Clipboard>(repl: &mut Repl<C>) -> Result<CommandResult> {
    UI::display_form(repl.controller.form());
    Ok(CommandResult::Continue)
}

pub fn help_command() -> Result<CommandResult> {
    UI::print_help();
    Ok(CommandResult::Continue)
}

pub fn exit_command() -> Result<CommandResult> {
    UI::print_goodbye();
    Ok(CommandResult::Exit)
}
