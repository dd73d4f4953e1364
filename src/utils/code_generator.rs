//! Share code generation and validation utilities.
//!
//! Codes are opaque to the resolver; these rules only apply when a code is
//! created.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

const CUSTOM_CODE_MIN_LEN: usize = 6;
const CUSTOM_CODE_MAX_LEN: usize = 64;

/// Generates a cryptographically secure random share code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate share code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Validates a caller-chosen share code.
///
/// # Rules
///
/// - Length: 6-64 characters
/// - Allowed characters: ASCII letters, digits, `-`, `_`
/// - Cannot start or end with `-` or `_`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !(CUSTOM_CODE_MIN_LEN..=CUSTOM_CODE_MAX_LEN).contains(&code.len()) {
        return Err(AppError::bad_request(
            format!(
                "Share code must be {}-{} characters",
                CUSTOM_CODE_MIN_LEN, CUSTOM_CODE_MAX_LEN
            ),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Share code can only contain letters, digits, hyphens and underscores",
            json!({ "code": code }),
        ));
    }

    let is_separator = |c: char| c == '-' || c == '_';
    if code.starts_with(is_separator) || code.ends_with(is_separator) {
        return Err(AppError::bad_request(
            "Share code cannot start or end with a separator",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
