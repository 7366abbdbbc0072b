//! System clipboard access.
//!
//! A failed copy is reported and can be retried; it never touches the
//! session.

use tracing::debug;

use crate::error::AppResult;

/// Somewhere quote text can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> AppResult<()>;
}

/// The operating system clipboard.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> AppResult<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        debug!(chars = text.len(), "Copied to clipboard");
        Ok(())
    }
}

/// Copies `text` and reports the outcome.
pub fn copy_text(clipboard: &mut dyn Clipboard, text: &str) -> AppResult<()> {
    clipboard.set_text(text)?;
    crate::notify::success("Quote copied to clipboard");
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::AppError;

    /// Records copied text, or refuses every copy.
    #[derive(Default)]
    pub struct MemoryClipboard {
        pub text: Option<String>,
        pub unavailable: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> AppResult<()> {
            if self.unavailable {
                return Err(AppError::clipboard("Failed to copy to clipboard: no display"));
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryClipboard;
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_copy_text() {
        let mut clipboard = MemoryClipboard::default();
        copy_text(&mut clipboard, "Total Excl VAT: R15.00").unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("Total Excl VAT: R15.00"));
    }

    #[test]
    fn test_copy_failure_is_retryable() {
        let mut clipboard = MemoryClipboard {
            unavailable: true,
            ..MemoryClipboard::default()
        };
        let err = copy_text(&mut clipboard, "x").unwrap_err();
        assert_eq!(err.code, ErrorCode::ClipboardError);
        assert!(err.code.is_retryable());
    }
}
