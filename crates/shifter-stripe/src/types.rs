//! Stripe API envelope types.
//!
//! Product and plan bodies deserialize straight into
//! [`shifter_core::RawProduct`] and [`shifter_core::RawPlan`]; this module
//! only models the wrappers around them.

use serde::Deserialize;

/// Stripe list envelope: `{"object": "list", "data": [...], "has_more": ...}`.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Stripe error envelope: `{"error": {"type": ..., "code": ..., "message": ...}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
