use thiserror::Error;

/// Errors raised by the message pipeline.
///
/// Each variant carries a stable machine-readable [`code`](MessageError::code),
/// a short human [`message`](MessageError::message) and
/// [`details`](MessageError::details). The HTTP layer maps variants to status
/// codes; nothing below it knows about HTTP.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("invalid message format: {0}")]
    InvalidFormat(String),

    /// Reserved for rejection-on-detection. Content is currently masked
    /// silently, so the processor never returns this.
    #[error("inappropriate content: {0}")]
    InappropriateContent(String),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("message '{0}' already exists")]
    DuplicateMessage(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl MessageError {
    pub fn code(&self) -> &'static str {
        match self {
            MessageError::InvalidFormat(_) => "INVALID_FORMAT",
            MessageError::InappropriateContent(_) => "INAPPROPRIATE_CONTENT",
            MessageError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            MessageError::DuplicateMessage(_) => "DUPLICATE_MESSAGE",
            MessageError::StorageError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MessageError::InvalidFormat(_) => "Invalid message format",
            MessageError::InappropriateContent(_) => "The message contains inappropriate content",
            MessageError::SessionNotFound(_) => "Session not found",
            MessageError::DuplicateMessage(_) => "Duplicate message",
            MessageError::StorageError(_) => "Internal server error",
        }
    }

    /// Client-facing details. Storage failures are reported generically.
    pub fn details(&self) -> String {
        match self {
            MessageError::InvalidFormat(details) => details.clone(),
            MessageError::InappropriateContent(details) => details.clone(),
            MessageError::SessionNotFound(session_id) => {
                format!("No messages found for session: {session_id}")
            }
            MessageError::DuplicateMessage(message_id) => {
                format!("A message with id '{message_id}' already exists")
            }
            MessageError::StorageError(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }
}

/// A rejected inbound field (request body or query parameter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}': {reason}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `content` or `limit`.
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from repository operations (used by trait definitions in courier-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Configuration that parsed but is not internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pagination.max_limit must be at least 1")]
    ZeroMaxLimit,

    #[error("pagination.default_limit {default_limit} must be between 1 and {max_limit}")]
    DefaultLimitOutOfRange { default_limit: u32, max_limit: u32 },
}
