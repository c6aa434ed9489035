pub const PLACEHOLDER_TEXT: &str = "Run \"generate\" to see preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTone {
    /// Nothing generated yet; rendered dimmed.
    Placeholder,
    Json,
    Error,
}

/// What the preview pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub tone: PreviewTone,
}

impl Default for Preview {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Preview {
    pub fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            tone: PreviewTone::Placeholder,
        }
    }

    pub fn json(text: String) -> Self {
        Self {
            text,
            tone: PreviewTone::Json,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            tone: PreviewTone::Error,
        }
    }

    #[cfg(test)]
    pub fn is_placeholder(&self) -> bool {
        self.tone == PreviewTone::Placeholder
    }
}
