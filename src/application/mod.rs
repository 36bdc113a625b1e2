//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository and
//! provider calls, validation, and retry rules.
//!
//! # Available Services
//!
//! - [`services::CodeAllocator`] - Custom code validation and unique code generation
//! - [`services::RegistrationService`] - Mapping creation and resolution
//! - [`services::UploadPipeline`] - Single-file upload against the storage provider
//! - [`services::BatchUploadOrchestrator`] - Concurrent batch upload with per-file isolation

pub mod errors;
pub mod services;

pub use errors::{BatchUploadError, FileShareError, RegistrationError, UploadError};
