//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`target_url`] - Target address validation
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod target_url;
