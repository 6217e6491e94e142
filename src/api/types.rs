//! API response types

use serde::Serialize;

/// Response for the topic listing
#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    #[serde(rename = "available effects")]
    pub available_effects: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
