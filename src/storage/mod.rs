pub mod local;
pub mod provider;

pub use local::*;
pub use provider::*;

use crate::error::{AppError, Result};

const MAX_FILENAME_BYTES: usize = 255;

/// Check that a client-supplied filename is a single plain path component.
///
/// Rejects separators, `.`/`..`, hidden names, and control characters so a
/// name can never resolve outside the media directory.
pub fn validate_filename(name: &str) -> Result<&str> {
    let invalid = |reason: &str| AppError::BadRequest(format!("Invalid filename: {}", reason));

    if name.trim().is_empty() {
        return Err(invalid("empty"));
    }
    if name.len() > MAX_FILENAME_BYTES {
        return Err(invalid("too long"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("path separators are not allowed"));
    }
    if name.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(invalid("control characters are not allowed"));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        for name in ["photo.jpg", "my image (1).png", "no_extension", "ünïcode.webp"] {
            assert_eq!(validate_filename(name).unwrap(), name);
        }
    }

    #[test]
    fn dangerous_names_fail() {
        let long = "a".repeat(300);
        for name in [
            "",
            "   ",
            ".",
            "..",
            ".hidden",
            "../etc/passwd",
            "a/b.png",
            "a\\b.png",
            "nul\0byte",
            "tab\tname",
            long.as_str(),
        ] {
            assert!(validate_filename(name).is_err(), "{name:?} should be rejected");
        }
    }
}
