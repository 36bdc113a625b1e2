//! Error types produced by the application services.
//!
//! Each variant maps onto one class of the failure taxonomy: user-correctable
//! input errors, conflicts, capacity exhaustion, per-file upload failures and
//! storage failures. Conversion to HTTP responses lives in [`crate::error`].

use thiserror::Error;

use crate::domain::repositories::StoreError;
use crate::utils::code_generator::InvalidCodeError;
use crate::utils::target_url::TargetUrlError;

/// Failure to turn a target address into a committed mapping.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid target URL: {0}")]
    InvalidTarget(#[from] TargetUrlError),

    #[error(transparent)]
    InvalidCode(#[from] InvalidCodeError),

    #[error("Short code '{0}' already exists")]
    CodeConflict(String),

    #[error("Failed to generate a unique short code after {0} attempts")]
    GenerationExhausted(usize),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(short) => Self::CodeConflict(short),
            StoreError::Storage(message) => Self::Storage(message),
        }
    }
}

/// Failure of one file's upload pipeline, classified by the failing step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Failed to obtain upload link for {filename}: {reason}")]
    UploadLink { filename: String, reason: String },

    #[error("Failed to upload {filename}: {reason}")]
    Transfer { filename: String, reason: String },

    #[error("Failed to obtain public link for {filename}")]
    AddressResolution { filename: String },

    #[error("Upload of {filename} was aborted: {reason}")]
    Aborted { filename: String, reason: String },
}

impl UploadError {
    /// Short machine-readable name of the failing step.
    pub fn step(&self) -> &'static str {
        match self {
            Self::UploadLink { .. } => "upload_link",
            Self::Transfer { .. } => "transfer",
            Self::AddressResolution { .. } => "address_resolution",
            Self::Aborted { .. } => "aborted",
        }
    }
}

/// Failure of one file in a batch, from upload through registration.
#[derive(Debug, Error)]
pub enum FileShareError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Failure that applies to a whole batch rather than to a single file.
#[derive(Debug, Error)]
pub enum BatchUploadError {
    #[error("File storage is not configured")]
    NotConfigured,
}
