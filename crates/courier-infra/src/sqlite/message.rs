//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `courier-core` using sqlx with split
//! read/write pools. Duplicate ids are caught by the primary key constraint,
//! so concurrent inserts of the same id cannot both succeed.

use courier_core::repository::message::{MessageFilter, MessagePage, MessageRepository};
use courier_types::error::RepositoryError;
use courier_types::message::{MessageRow, Sender};
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<MessageRow, RepositoryError> {
    let sender: String = row.try_get("sender").map_err(query_err)?;
    let sender = sender.parse::<Sender>().map_err(RepositoryError::Query)?;
    let word_count: i64 = row.try_get("word_count").map_err(query_err)?;
    let character_count: i64 = row.try_get("character_count").map_err(query_err)?;

    Ok(MessageRow {
        message_id: row.try_get("message_id").map_err(query_err)?,
        session_id: row.try_get("session_id").map_err(query_err)?,
        content: row.try_get("content").map_err(query_err)?,
        timestamp: row.try_get("timestamp").map_err(query_err)?,
        sender,
        word_count: count_from_i64(word_count, "word_count")?,
        character_count: count_from_i64(character_count, "character_count")?,
        processed_at: row.try_get("processed_at").map_err(query_err)?,
    })
}

fn count_from_i64(value: i64, column: &str) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::Query(format!("{column} out of range: {value}")))
}

/// Append `WHERE session_id = ? [AND sender = ?]`.
fn push_session_filter<'a>(
    builder: &mut QueryBuilder<'a, Sqlite>,
    session_id: &'a str,
    sender: Option<Sender>,
) {
    builder.push(" WHERE session_id = ").push_bind(session_id);
    if let Some(sender) = sender {
        builder.push(" AND sender = ").push_bind(sender.as_str());
    }
}

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn save(&self, row: &MessageRow) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO messages
               (message_id, session_id, content, timestamp, sender,
                word_count, character_count, processed_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&row.message_id)
        .bind(&row.session_id)
        .bind(&row.content)
        .bind(&row.timestamp)
        .bind(row.sender.as_str())
        .bind(i64::from(row.word_count))
        .bind(i64::from(row.character_count))
        .bind(&row.processed_at)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("message '{}' already exists", row.message_id)),
            ),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn fetch_by_session(
        &self,
        session_id: &str,
        filter: &MessageFilter,
    ) -> Result<MessagePage, RepositoryError> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM messages");
        push_session_filter(&mut count_query, session_id, filter.sender);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_err)?;

        let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM messages");
        push_session_filter(&mut select, session_id, filter.sender);
        select
            .push(" ORDER BY timestamp ASC, rowid ASC LIMIT ")
            .push_bind(i64::from(filter.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(filter.offset).unwrap_or(i64::MAX));

        let rows = select
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            messages.push(row_to_message(row)?);
        }

        Ok(MessagePage {
            rows: messages,
            total: total.max(0) as u64,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
