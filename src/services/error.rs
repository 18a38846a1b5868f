use serde_json::Value;
use thiserror::Error;

use crate::utils::constants::FALLBACK_ERROR_MESSAGE;

/// Failure of a single API call. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// 401; the stored token was cleared if it was the one sent
    #[error("{detail}")]
    Unauthorized { detail: String },

    /// Any other non-2xx status
    #[error("{detail}")]
    Status { status: u16, detail: String },

    /// A 2xx body that was not JSON or did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for a failed status from whatever body came back
    pub fn from_status(status: u16, body: Option<&Value>) -> Self {
        let detail = body
            .and_then(extract_detail)
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        if status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Status { status, detail }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// `detail` as a string, or the `msg` entries of a validation error list
fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
