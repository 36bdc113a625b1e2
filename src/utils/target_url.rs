//! Validation of target addresses before they are mapped to a short code.
//!
//! Targets are stored verbatim: resolving a code must hand back exactly the
//! string that was registered, so nothing here rewrites the input.

use url::Url;

/// Maximum length of a stored target address.
pub const MAX_TARGET_LENGTH: usize = 2048;

/// Errors that can occur while validating a target address.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must be at most {max} characters, got {length}")]
    TooLong { length: usize, max: usize },

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Checks that `input` is a storable http(s) target address.
///
/// # Rules
///
/// 1. Must not be empty or whitespace-only
/// 2. At most [`MAX_TARGET_LENGTH`] characters
/// 3. No control characters (they cannot appear in a `Location` header)
/// 4. Must parse as an absolute URL
/// 5. Scheme must be `http` or `https`
///
/// # Errors
///
/// Returns the first violated rule as a [`TargetUrlError`].
pub fn validate_target_url(input: &str) -> Result<(), TargetUrlError> {
    if input.trim().is_empty() {
        return Err(TargetUrlError::Empty);
    }

    let length = input.chars().count();
    if length > MAX_TARGET_LENGTH {
        return Err(TargetUrlError::TooLong {
            length,
            max: MAX_TARGET_LENGTH,
        });
    }

    // Url::parse strips tab, CR and LF instead of rejecting them.
    if input.chars().any(char::is_control) {
        return Err(TargetUrlError::InvalidFormat(
            "URL must not contain control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(TargetUrlError::UnsupportedProtocol),
    }
}
