use crate::error::{DsgenError, Result};

/// Wraps a failure with a description of what was being attempted.
pub trait ResultExt<T> {
    fn context(self, msg: &str) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DsgenError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DsgenError::Context {
            message: f(),
            source: Box::new(e.into()),
        })
    }
}
