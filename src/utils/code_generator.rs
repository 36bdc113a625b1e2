//! Short code generation and format validation.
//!
//! Codes are drawn from a 62-symbol alphabet (ASCII letters and digits).
//! Nothing here touches storage: uniqueness is the job of
//! [`crate::application::services::CodeAllocator`].

use rand::Rng;
use thiserror::Error;

/// Symbols a short code may consist of.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Maximum length of any short code, custom or generated.
pub const MAX_CODE_LENGTH: usize = 16;

/// Length of codes produced by [`generate_code`].
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Upper bound on draws (and on insert retries) before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Codes that collide with static route segments.
///
/// Compared case-insensitively.
pub const RESERVED_CODES: &[&str] = &["files", "api", "health"];

/// Reasons a caller-supplied short code is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCodeError {
    #[error("Short code '{0}' is reserved")]
    Reserved(String),

    #[error("Short code must not be empty")]
    Empty,

    #[error("Short code must be at most 16 characters, got {0}")]
    TooLong(usize),

    #[error("Short code may only contain ASCII letters and digits")]
    InvalidCharacters,
}

/// Returns true if `code` matches a reserved route segment.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Checks a custom code against the reserved set and the format rules.
///
/// The candidate is trimmed first and the trimmed form is returned on
/// success. The reserved check runs before the format checks.
///
/// # Errors
///
/// Returns the first violated rule as an [`InvalidCodeError`].
pub fn check_custom_code(candidate: &str) -> Result<&str, InvalidCodeError> {
    let code = candidate.trim();

    if is_reserved(code) {
        return Err(InvalidCodeError::Reserved(code.to_string()));
    }

    if code.is_empty() {
        return Err(InvalidCodeError::Empty);
    }

    let length = code.chars().count();
    if length > MAX_CODE_LENGTH {
        return Err(InvalidCodeError::TooLong(length));
    }

    if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(InvalidCodeError::InvalidCharacters);
    }

    Ok(code)
}

/// Draws a code of `length` symbols uniformly from [`ALPHABET`].
pub fn generate_code_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Draws a [`GENERATED_CODE_LENGTH`]-symbol code using the thread-local RNG.
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng(), GENERATED_CODE_LENGTH)
}
