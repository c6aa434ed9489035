use crate::api::GeneratorClient;
use crate::clipboard::Clipboard;
use crate::error::{DsgenError, Result};
use crate::export;
use crate::form::{Form, FormSnapshot};
use crate::history::History;
use crate::session::{Preview, SessionState};
use chrono::{Local, Utc};
use serde_json::Value;
use std::path::PathBuf;

/// Owns the form, the preview and the session state, and runs every
/// user-triggered action against them.
///
/// `generate` takes `&mut self` across the request, so a second generation
/// cannot start until the first one has resolved.
pub struct SessionController<C: Clipboard> {
    client: GeneratorClient,
    clipboard: C,
    output_dir: PathBuf,
    form: Form,
    preview: Preview,
    state: SessionState,
}

impl<C: Clipboard> SessionController<C> {
    pub fn new(
        client: GeneratorClient,
        clipboard: C,
        form: Form,
        output_dir: PathBuf,
        history_limit: usize,
    ) -> Self {
        Self {
            client,
            clipboard,
            output_dir,
            form,
            preview: Preview::placeholder(),
            state: SessionState::new(history_limit),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    #[cfg(test)]
    pub fn current_payload(&self) -> Option<&Value> {
        self.state.current_payload.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// Sends the non-empty fields of `snapshot` to the generator and records
    /// the response. On failure the preview switches to the error text and
    /// the session is otherwise unchanged.
    pub async fn generate(&mut self, snapshot: &FormSnapshot) -> Result<()> {
        let config = snapshot.to_config();

        let outcome = match self.client.generate(&config).await {
            Ok(payload) => export::pretty_json(&payload).map(|text| (payload, text)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((payload, text)) => {
                self.preview = Preview::json(text);
                self.state.record(payload, Utc::now());
                tracing::debug!(history = self.state.history.len(), "Generation recorded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed");
                self.preview = Preview::error(format!("Error generating JSON: {}", e));
                Err(e)
            }
        }
    }

    pub fn copy_current(&mut self) -> Result<()> {
        let payload = self.state.current_payload.as_ref().ok_or(DsgenError::NoPayload)?;
        let text = export::pretty_json(payload)?;
        self.clipboard.set_text(&text)
    }

    /// Writes `digital-sales-payload-<local date>.json` into the output directory.
    pub fn export_current_as_file(&self) -> Result<PathBuf> {
        let payload = self.state.current_payload.as_ref().ok_or(DsgenError::NoPayload)?;
        let download = export::payload_download(payload, Local::now().date_naive())?;
        download.save_to(&self.output_dir)
    }

    /// Clears field values, the preview and the current payload. History stays.
    pub fn reset_form(&mut self) {
        self.form.clear();
        self.preview = Preview::placeholder();
        self.state.clear_current();
    }

    pub fn show_history_summary(&self) -> Result<Vec<String>> {
        if self.state.history.is_empty() {
            return Err(DsgenError::NoHistory);
        }
        Ok(self.state.history.summary_lines())
    }

    /// Writes `digital-sales-history-<local date>.csv` into the output directory.
    pub fn export_history_as_csv(&self) -> Result<PathBuf> {
        let download = export::history_download(&self.state.history, Local::now().date_naive())?;
        download.save_to(&self.output_dir)
    }
}
