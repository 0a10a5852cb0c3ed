//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, is `{ "success": bool, "data"?: T,
//! "error"?: string }`. Error envelopes are built by
//! [`AppError`](crate::error::AppError); handlers only build successes.

use serde::Serialize;

/// Standard `{ success, data?, error? }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(drawings)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with no payload, e.g. after a delete.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}
