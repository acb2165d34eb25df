//! Command-line input validation.
//!
//! Arguments are passed to `Command::new` directly (no shell), so the main
//! risk is control characters confusing downstream argument parsing. Program
//! paths get stricter treatment because they name what actually runs.

use crate::error::{ExecError, Result};

/// Characters that are never allowed in command arguments.
const FORBIDDEN_CHARS: &[char] = &[
    '\0', // Null byte
    '\n', // Newline (can break argument parsing)
    '\r', // Carriage return
];

/// Validate a single command argument.
///
/// # Errors
///
/// Returns an error if the argument contains forbidden characters.
pub fn validate_argument(arg: &str, field_name: &str) -> Result<()> {
    for c in arg.chars() {
        if FORBIDDEN_CHARS.contains(&c) {
            return Err(ExecError::invalid_argument(field_name, c.to_string()));
        }
    }
    Ok(())
}

/// Validate a program name or path.
///
/// # Errors
///
/// Returns an error if the path is empty, contains `..` traversal, or
/// contains shell metacharacters.
pub fn validate_program_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExecError::EmptyCommand);
    }

    if path.contains("..") {
        return Err(ExecError::invalid_argument("program path", ".."));
    }

    for c in path.chars() {
        if FORBIDDEN_CHARS.contains(&c) || matches!(c, ';' | '&' | '|' | '$' | '`') {
            return Err(ExecError::invalid_argument("program path", c.to_string()));
        }
    }

    Ok(())
}
