use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere exported text can be copied to
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// egui forwards the text to the platform clipboard at the end of the frame.
///
/// egui reports no outcome back, so this sink never fails and the real app
/// never shows a clipboard failure notice.
impl ClipboardSink for egui::Context {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        egui::Context::copy_text(self, text.to_owned());
        Ok(())
    }
}

/// Keeps everything copied, for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Vec<String>,
    /// When set, every copy fails with this reason
    pub failure: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(reason) = &self.failure {
            return Err(ClipboardError::Unavailable(reason.clone()));
        }
        self.contents.push(text.to_owned());
        Ok(())
    }
}
