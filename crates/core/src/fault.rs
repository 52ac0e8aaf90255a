//! Fault bodies returned by the service on 4xx/5xx responses.
//!
//! ```json
//! { "error": { "code": "EntityNotFoundError", "message": "...", "details": [ ... ] } }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: ErrorInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Machine-readable error code, e.g. `EntityNotFoundError`.
    pub code: String,
    #[serde(default)]
    pub message: String,
    /// Field or parameter the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fault_code: Option<String>,
    #[serde(default)]
    pub help_link: Option<String>,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

impl ErrorResult {
    /// Try to read a fault envelope out of a raw response body.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
