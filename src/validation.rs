//! Input validation for user-supplied codes and names.
//!
//! Codes end up in file path construction, so they are validated before use
//! to prevent path traversal and other surprises.

use anyhow::{bail, Result};

/// Maximum allowed length for codes (activity, mechanism).
pub const MAX_CODE_LENGTH: usize = 64;

/// Maximum allowed length for task and mechanism names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Reserved names that cannot be used as codes (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validates that a code is safe for use in file paths.
///
/// A code is valid if:
/// - It is not empty
/// - It is no longer than MAX_CODE_LENGTH characters
/// - It contains only alphanumeric characters, dashes, underscores, and
///   dots (schedule codes like `1.1-A` use dots)
/// - It does not start or end with a dot
/// - It does not use reserved system names
pub fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        bail!("Code cannot be empty");
    }

    if code.len() > MAX_CODE_LENGTH {
        bail!(
            "Code too long: {} characters (max {})",
            code.len(),
            MAX_CODE_LENGTH
        );
    }

    let valid_chars = code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars {
        bail!("Code '{code}' contains invalid characters. Use only alphanumeric characters, dashes (-), underscores (_), and dots (.)");
    }

    if code.starts_with('.') || code.ends_with('.') {
        bail!("Code '{code}' cannot start or end with a dot");
    }

    let code_lower = code.to_lowercase();
    if RESERVED_NAMES.contains(&code_lower.as_str()) {
        bail!("Code '{code}' uses a reserved name");
    }

    Ok(())
}

/// Validates that a name is within acceptable length limits.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Name cannot be empty");
    }
    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "Name too long: {} characters (max {})",
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    Ok(())
}

/// Clap value parser for validating code arguments at parse time.
pub fn clap_code_validator(s: &str) -> Result<String, String> {
    validate_code(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for validating name arguments at parse time.
pub fn clap_name_validator(s: &str) -> Result<String, String> {
    validate_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
