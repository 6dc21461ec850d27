//! Envelope response format for all API responses.
//!
//! Success:
//! ```json
//! { "status": "success", "data": { ... } }
//! ```
//! List endpoints add `"pagination": { "total": 5, "limit": 2, "offset": 3 }`.
//! Errors:
//! ```json
//! { "status": "error", "error": { "code": "...", "message": "...", "details": "..." } }
//! ```

use serde::Serialize;

/// Success envelope wrapping the response payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Paging information echoed back on list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Matching rows ignoring limit/offset.
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            status: "success",
            data,
            pagination: Some(pagination),
        }
    }
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: &'static str,
    pub error: ApiErrorDetail,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    pub details: String,
}

impl ApiError {
    pub fn new(code: &str, message: &str, details: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
                details: details.into(),
            },
        }
    }
}
