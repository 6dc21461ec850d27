//! In-memory message repository.
//!
//! Implements `MessageRepository` over a `DashMap` keyed by `message_id`.
//! Used by tests and for running the API without a database file. Nothing
//! survives a restart.

use std::sync::atomic::{AtomicU64, Ordering};

use courier_core::repository::message::{MessageFilter, MessagePage, MessageRepository};
use courier_types::error::RepositoryError;
use courier_types::message::MessageRow;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Debug, Clone)]
struct StoredRow {
    /// Insertion sequence, the tie-breaker for equal timestamps.
    seq: u64,
    row: MessageRow,
}

/// DashMap-backed implementation of `MessageRepository`.
///
/// The entry API locks the key's shard for the duration of check-and-insert,
/// so two concurrent saves of one id yield exactly one `Conflict`.
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    rows: DashMap<String, StoredRow>,
    next_seq: AtomicU64,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, row: &MessageRow) -> Result<(), RepositoryError> {
        match self.rows.entry(row.message_id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "message '{}' already exists",
                row.message_id
            ))),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(StoredRow {
                    seq,
                    row: row.clone(),
                });
                Ok(())
            }
        }
    }

    async fn fetch_by_session(
        &self,
        session_id: &str,
        filter: &MessageFilter,
    ) -> Result<MessagePage, RepositoryError> {
        let mut matching: Vec<StoredRow> = self
            .rows
            .iter()
            .filter(|e| e.row.session_id == session_id)
            .filter(|e| filter.sender.is_none_or(|s| e.row.sender == s))
            .map(|e| e.value().clone())
            .collect();

        matching.sort_by(|a, b| {
            a.row
                .timestamp
                .cmp(&b.row.timestamp)
                .then(a.seq.cmp(&b.seq))
        });

        let total = matching.len() as u64;
        let rows = matching
            .into_iter()
            .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
            .take(filter.limit as usize)
            .map(|stored| stored.row)
            .collect();

        Ok(MessagePage { rows, total })
    }
}
