//! Copying binding rows out of the viewer.

/// Destination for copied rows. Returns false when the text was not stored.
pub trait ClipboardProvider {
    fn set_text(&mut self, text: String) -> bool;
}

/// The desktop clipboard, opened per copy.
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: String) -> bool {
        let mut cb = match arboard::Clipboard::new() {
            Ok(cb) => cb,
            Err(e) => {
                tracing::debug!("clipboard unavailable: {}", e);
                return false;
            }
        };
        cb.set_text(text).is_ok()
    }
}

/// In-memory clipboard used by tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl ClipboardProvider for MemoryClipboard {
    fn set_text(&mut self, text: String) -> bool {
        if self.fail {
            false
        } else {
            self.text = Some(text);
            true
        }
    }
}
