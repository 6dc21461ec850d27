//! Message repository trait definition.

use courier_types::error::RepositoryError;
use courier_types::message::{MessageRow, Sender};

/// Filter and pagination for a session history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFilter {
    /// Only messages from this sender, when set.
    pub sender: Option<Sender>,
    /// Maximum number of rows to return.
    pub limit: u32,
    /// Number of matching rows to skip.
    pub offset: u64,
}

impl Default for MessageFilter {
    fn default() -> Self {
        Self {
            sender: None,
            limit: 50,
            offset: 0,
        }
    }
}

/// A slice of matching rows plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePage {
    pub rows: Vec<MessageRow>,
    pub total: u64,
}

/// Repository trait for message persistence.
///
/// Implementations live in courier-infra (SQLite and in-memory).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MessageRepository: Send + Sync {
    /// Insert a row.
    ///
    /// Returns `Conflict` if `message_id` already exists; the existing row is
    /// never overwritten. The uniqueness check and insert are atomic.
    fn save(
        &self,
        row: &MessageRow,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch one page of a session's messages.
    ///
    /// Rows are ordered by `timestamp` ascending (string order), ties by
    /// insertion order. `total` counts every row matching `session_id` and
    /// the sender filter, ignoring `limit` and `offset`.
    fn fetch_by_session(
        &self,
        session_id: &str,
        filter: &MessageFilter,
    ) -> impl std::future::Future<Output = Result<MessagePage, RepositoryError>> + Send;
}
