//! # Clipboard
//!
//! Write-only access to the system clipboard, behind `ClipboardWriter` so
//! tests can swap in a fake.
//!
//! Writes block (X11/Wayland round-trips), so callers run them on
//! `tokio::task::spawn_blocking`.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display).
    Unavailable(String),
    /// The clipboard was opened but the write was refused.
    Write(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "clipboard unavailable: {msg}"),
            ClipboardError::Write(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via `arboard`.
///
/// The handle is opened lazily and kept for the life of the process: on
/// Linux the copied text is only served while the handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;

        if guard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            *guard = Some(clipboard);
        }

        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ClipboardError::Write(e.to_string())),
            None => Err(ClipboardError::Unavailable("no clipboard handle".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingClipboard;

    #[test]
    fn error_display() {
        assert_eq!(
            ClipboardError::Unavailable("no display".to_string()).to_string(),
            "clipboard unavailable: no display"
        );
        assert_eq!(
            ClipboardError::Write("denied".to_string()).to_string(),
            "clipboard write failed: denied"
        );
    }

    #[test]
    fn recording_clipboard_keeps_writes_in_order() {
        let clipboard = RecordingClipboard::default();
        clipboard.write_text("one").unwrap();
        clipboard.write_text("two").unwrap();
        assert_eq!(clipboard.writes(), vec!["one".to_string(), "two".to_string()]);
    }
}
