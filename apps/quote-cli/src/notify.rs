//! User-facing notifications on stderr.
//!
//! Stdout carries the quote itself, so it can be piped; everything the user
//! should notice but not capture goes here.

use crate::error::AppError;

/// `✓ Quote copied to clipboard`
pub fn success(message: impl AsRef<str>) {
    eprintln!("✓ {}", message.as_ref());
}

/// `! Settings not saved: ...`
pub fn warning(message: impl AsRef<str>) {
    eprintln!("! {}", message.as_ref());
}

/// `✗ [CLIPBOARD_ERROR] Failed to copy to clipboard: ... (try again)`
pub fn failure(err: &AppError) {
    eprintln!("{}", failure_line(err));
}

/// `{"code":"STORAGE_ERROR","message":"..."}` for commands run with `--json`.
pub fn failure_json(err: &AppError) {
    eprintln!("{}", failure_json_line(err));
}

fn failure_json_line(err: &AppError) -> String {
    serde_json::to_string(err).unwrap_or_else(|_| failure_line(err))
}

fn failure_line(err: &AppError) -> String {
    if err.code.is_retryable() {
        format!("✗ {} (nothing was changed, try again)", err)
    } else {
        format!("✗ {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_line() {
        let err = AppError::validation("width must be positive");
        assert_eq!(failure_line(&err), "✗ [VALIDATION_ERROR] width must be positive");

        let err = AppError::clipboard("no display");
        assert!(failure_line(&err).ends_with("(nothing was changed, try again)"));
    }

    #[test]
    fn test_failure_json_line() {
        let err = AppError::validation("vat rate must be between 0 and 100");
        let value: serde_json::Value = serde_json::from_str(&failure_json_line(&err)).unwrap();
        assert_eq!(value["code"], "VALIDATION_ERROR");
        assert_eq!(value["message"], "vat rate must be between 0 and 100");
    }
}
