use arboard::Clipboard as SystemBoard;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The host clipboard. Fails on headless machines, which the caller reports
/// as a notice.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = SystemBoard::new().map_err(|e| ClipboardError(e.to_string()))?;
        clipboard.set_text(text.to_string()).map_err(|e| ClipboardError(e.to_string()))?;
        Ok(())
    }
}
