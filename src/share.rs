//! Copying the share link.
//!
//! The async clipboard API is tried first; if it is missing or rejects the
//! write, the legacy select-and-copy command is used instead. The user sees
//! the same acknowledgment either way.

use crate::diag;
use crate::error::ClipboardError;

/// Message shown after every share.
pub const SHARE_ACK: &str = "Shareable link copied to clipboard!";

#[allow(async_fn_in_trait)]
pub trait Clipboard {
    /// Write through the asynchronous clipboard API.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
    /// Best-effort copy through the deprecated `execCommand("copy")` path.
    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// How the link ended up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    Fallback,
    /// Both paths failed; only logged.
    Failed,
}

pub async fn copy_with_fallback<C: Clipboard>(clipboard: &C, text: &str) -> CopyOutcome {
    match clipboard.write_text(text).await {
        Ok(()) => CopyOutcome::Clipboard,
        Err(e) => {
            diag::info(&format!("{}, using legacy copy", e));
            match clipboard.legacy_copy(text) {
                Ok(()) => CopyOutcome::Fallback,
                Err(e) => {
                    diag::warn(&format!("legacy copy failed: {}", e));
                    CopyOutcome::Failed
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeClipboard {
        primary: Result<(), ClipboardError>,
        legacy: Result<(), ClipboardError>,
        copied: RefCell<Vec<(&'static str, String)>>,
    }

    impl FakeClipboard {
        fn new(primary: Result<(), ClipboardError>, legacy: Result<(), ClipboardError>) -> Self {
            Self { primary, legacy, copied: RefCell::new(Vec::new()) }
        }
    }

    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.primary.is_ok() {
                self.copied.borrow_mut().push(("api", text.to_string()));
            }
            self.primary.clone()
        }

        fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError> {
            if self.legacy.is_ok() {
                self.copied.borrow_mut().push(("legacy", text.to_string()));
            }
            self.legacy.clone()
        }
    }

    #[test]
    fn uses_clipboard_api_when_available() {
        let clip = FakeClipboard::new(Ok(()), Ok(()));
        let outcome = pollster::block_on(copy_with_fallback(&clip, "https://cake/?candles=W10"));
        assert_eq!(outcome, CopyOutcome::Clipboard);
        assert_eq!(*clip.copied.borrow(), vec![("api", "https://cake/?candles=W10".to_string())]);
    }

    #[test]
    fn falls_back_when_api_missing() {
        let clip = FakeClipboard::new(Err(ClipboardError::Unavailable), Ok(()));
        let outcome = pollster::block_on(copy_with_fallback(&clip, "link"));
        assert_eq!(outcome, CopyOutcome::Fallback);
        assert_eq!(*clip.copied.borrow(), vec![("legacy", "link".to_string())]);
    }

    #[test]
    fn falls_back_when_api_rejects() {
        let clip = FakeClipboard::new(Err(ClipboardError::Rejected("NotAllowedError".into())), Ok(()));
        assert_eq!(pollster::block_on(copy_with_fallback(&clip, "link")), CopyOutcome::Fallback);
    }

    #[test]
    fn both_paths_failing_is_reported_not_raised() {
        let clip = FakeClipboard::new(
            Err(ClipboardError::Unavailable),
            Err(ClipboardError::Rejected("execCommand returned false".into())),
        );
        assert_eq!(pollster::block_on(copy_with_fallback(&clip, "link")), CopyOutcome::Failed);
        assert!(clip.copied.borrow().is_empty());
    }
}
