//! Business logic services for the application layer.

pub mod batch_upload;
pub mod code_allocator;
pub mod registration_service;
pub mod upload_pipeline;

pub use batch_upload::{BatchUploadOrchestrator, SharedFile};
pub use code_allocator::CodeAllocator;
pub use registration_service::RegistrationService;
pub use upload_pipeline::UploadPipeline;
