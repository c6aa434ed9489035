use crate::error::{DsgenError, Result};

/// Plain-text clipboard sink.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. The handle is opened on first use so that a
/// headless session only fails when it actually tries to copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    hold_until_pasted: bool,
}

impl SystemClipboard {
    /// On X11/Wayland the selection is owned by the copying process and is
    /// lost when it exits.
    pub const HOLDS_UNTIL_PASTED: bool = cfg!(all(
        unix,
        not(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "android",
            target_os = "emscripten"
        ))
    ));

    pub fn new() -> Self {
        Self::default()
    }

    /// For processes that exit right after copying: `set_text` blocks until
    /// another application has taken the text, where the platform needs it.
    pub fn holding_until_pasted() -> Self {
        Self {
            inner: None,
            hold_until_pasted: Self::HOLDS_UNTIL_PASTED,
        }
    }
}

#[cfg(all(
    unix,
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_os = "emscripten"
    ))
))]
fn write_text(clipboard: &mut arboard::Clipboard, text: &str, hold: bool) -> Result<()> {
    use arboard::SetExtLinux;

    let set = clipboard.set();
    let set = if hold { set.wait() } else { set };
    set.text(text.to_string())
        .map_err(|e| DsgenError::Clipboard(e.to_string()))
}

#[cfg(not(all(
    unix,
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_os = "emscripten"
    ))
)))]
fn write_text(clipboard: &mut arboard::Clipboard, text: &str, _hold: bool) -> Result<()> {
    clipboard
        .set_text(text.to_string())
        .map_err(|e| DsgenError::Clipboard(e.to_string()))
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let handle = arboard::Clipboard::new()
                .map_err(|e| DsgenError::Clipboard(format!("clipboard unavailable: {}", e)))?;
            self.inner = Some(handle);
        }

        match self.inner.as_mut() {
            Some(clipboard) => write_text(clipboard, text, self.hold_until_pasted),
            None => Err(DsgenError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

/// Keeps copied text in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub writes: usize,
    pub reject: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.writes += 1;
        if self.reject {
            return Err(DsgenError::Clipboard("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_text() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.set_text("{}").unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("{}"));
        assert_eq!(clipboard.writes, 1);
    }

    #[test]
    fn test_one_shot_clipboard_holds_where_needed() {
        assert!(!SystemClipboard::new().hold_until_pasted);
        assert_eq!(
            SystemClipboard::holding_until_pasted().hold_until_pasted,
            SystemClipboard::HOLDS_UNTIL_PASTED
        );
        #[cfg(target_os = "linux")]
        assert!(SystemClipboard::HOLDS_UNTIL_PASTED);
        #[cfg(target_os = "macos")]
        assert!(!SystemClipboard::HOLDS_UNTIL_PASTED);
    }

    #[test]
    fn test_rejecting_clipboard() {
        let mut clipboard = MemoryClipboard::rejecting();
        let err = clipboard.set_text("{}").unwrap_err();
        assert!(matches!(err, DsgenError::Clipboard(_)));
        assert!(clipboard.contents.is_none());
    }
}
