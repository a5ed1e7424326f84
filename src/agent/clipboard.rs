//! System clipboard access through arboard

use crate::error::{FluentError, FluentResult};
use arboard::Clipboard;

/// Read/write access to a text clipboard
pub trait ClipboardAccess: Send {
    /// Current text; an empty or non-text clipboard reads as ""
    fn get_text(&mut self) -> FluentResult<String>;

    fn set_text(&mut self, text: &str) -> FluentResult<()>;
}

/// The desktop clipboard
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> FluentResult<Self> {
        let inner = Clipboard::new()
            .map_err(|e| FluentError::Clipboard(format!("Failed to initialize clipboard: {}", e)))?;
        Ok(Self { inner })
    }
}

impl ClipboardAccess for SystemClipboard {
    fn get_text(&mut self) -> FluentResult<String> {
        match self.inner.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(FluentError::Clipboard(format!(
                "Failed to read clipboard: {}",
                e
            ))),
        }
    }

    fn set_text(&mut self, text: &str) -> FluentResult<()> {
        self.inner
            .set_text(text)
            .map_err(|e| FluentError::Clipboard(format!("Failed to set clipboard: {}", e)))
    }
}
