//! Core domain entities.
//!
//! - [`Mapping`] - A persisted short code → target address association
//! - [`NewMapping`] - Insert payload for a mapping
//! - [`FileInput`] / [`UploadOutcome`] - Per-file values of the batch upload path

pub mod mapping;
pub mod upload;

pub use mapping::{Mapping, NewMapping};
pub use upload::{FileInput, UploadOutcome};
