//! DTOs for the mapping API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a target address under a short code.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMappingRequest {
    /// Target address, must be an absolute http(s) URL.
    #[validate(length(min = 1, max = 2048, message = "\"url\" must be 1-2048 characters"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional caller-chosen code; blank means "generate one".
    #[serde(default)]
    pub custom_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateMappingResponse {
    pub url: String,
    pub short_link: String,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub url: String,
}
