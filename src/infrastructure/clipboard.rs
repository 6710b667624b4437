use crate::domain::SubmittedSnapshot;
use std::fmt;

#[derive(Debug)]
pub enum ClipboardError {
    Serialize(serde_json::Error),
    Clipboard(arboard::Error),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Serialize(err) => write!(f, "cannot serialize summary: {}", err),
            ClipboardError::Clipboard(err) => write!(f, "clipboard unavailable: {}", err),
        }
    }
}

impl std::error::Error for ClipboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClipboardError::Serialize(err) => Some(err),
            ClipboardError::Clipboard(err) => Some(err),
        }
    }
}

pub struct SummaryClipboard;

impl SummaryClipboard {
    /// Places the snapshot on the system clipboard as pretty-printed JSON.
    pub fn copy(snapshot: &SubmittedSnapshot) -> Result<(), ClipboardError> {
        let json = snapshot.to_json().map_err(ClipboardError::Serialize)?;
        let mut clipboard = arboard::Clipboard::new().map_err(ClipboardError::Clipboard)?;
        clipboard.set_text(json).map_err(ClipboardError::Clipboard)
    }
}
