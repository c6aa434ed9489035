use thiserror::Error;

#[derive(Error, Debug)]
pub enum DsgenError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {status}")]
    Request { status: u16 },

    #[error("No JSON available. Generate a payload first.")]
    NoPayload,

    #[error("No history available")]
    NoHistory,

    #[error("Failed to copy JSON to clipboard: {0}")]
    Clipboard(String),

    #[error("History entry {index} has a malformed payload: {reason}")]
    MalformedPayload { index: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<DsgenError>,
    },
}

impl DsgenError {
    /// Follow-up line shown under the error, when there is an obvious next step.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DsgenError::NoPayload => Some("Run 'generate' first."),
            DsgenError::NoHistory => Some("History fills up as payloads are generated."),
            DsgenError::Network(_) => {
                Some("Is the generator backend running? Check --endpoint or DSGEN_ENDPOINT.")
            }
            DsgenError::Clipboard(_) => Some("Use 'export' to save the payload to a file instead."),
            DsgenError::Context { source, .. } => source.hint(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DsgenError>;
