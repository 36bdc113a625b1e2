//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod files;
pub mod health;
pub mod mapping;
pub mod redirect;

pub use files::files_handler;
pub use health::health_handler;
pub use mapping::{create_mapping_handler, lookup_handler};
pub use redirect::redirect_handler;
