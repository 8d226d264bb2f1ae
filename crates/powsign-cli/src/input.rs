//! Resolution of the message to sign.

use std::io::Read;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no input received from argument or stdin")]
    Missing,
    #[error("failed to read stdin: {0}")]
    Read(#[from] std::io::Error),
}

/// Use `arg` when given and non-empty, otherwise read `stdin` to the end.
///
/// Piped input is trimmed so the trailing newline of the search stage is not
/// part of the message.
pub fn resolve_message<R: Read>(arg: Option<String>, mut stdin: R) -> Result<String, InputError> {
    if let Some(message) = arg.filter(|m| !m.is_empty()) {
        info!("Using argument: {}", message);
        return Ok(message);
    }

    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    let message = buf.trim();
    if message.is_empty() {
        return Err(InputError::Missing);
    }

    info!("Read from stdin: {}", message);
    Ok(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    #[test]
    fn test_argument_wins() {
        let message = resolve_message(Some("dewei108568".into()), Cursor::new("ignored")).unwrap();
        assert_eq!(message, "dewei108568");
    }

    #[test]
    fn test_reads_trimmed_stdin() {
        let message = resolve_message(None, Cursor::new("dewei108568\n")).unwrap();
        assert_eq!(message, "dewei108568");
    }

    #[test]
    fn test_empty_argument_falls_back_to_stdin() {
        let message = resolve_message(Some(String::new()), Cursor::new("  alice7 ")).unwrap();
        assert_eq!(message, "alice7");
    }

    #[test]
    fn test_missing_input() {
        let err = resolve_message(None, Cursor::new("   \n")).unwrap_err();
        assert!(matches!(err, InputError::Missing));

        let err = resolve_message(None, io::empty()).unwrap_err();
        assert!(matches!(err, InputError::Missing));
    }
}
