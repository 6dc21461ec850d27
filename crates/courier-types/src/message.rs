//! Chat message types for Courier.
//!
//! A message moves through three shapes:
//! - [`IncomingMessage`]: the validated client payload.
//! - [`ProcessedMessage`]: filtered content plus computed [`MessageMetadata`].
//!   This is the canonical shape returned to clients.
//! - [`MessageRow`]: the flattened storage representation with metadata
//!   fields inlined.
//!
//! `MessageRow::from(ProcessedMessage)` flattens and
//! `ProcessedMessage::from(MessageRow)` nests; the two are exact inverses.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who sent a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'system'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::System => "system",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = String;

    /// Parsing is case-sensitive: only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "system" => Ok(Sender::System),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A chat message as submitted by a client, after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub message_id: String,
    pub session_id: String,
    pub content: String,
    /// ISO-8601 timestamp as supplied by the client (kept verbatim).
    pub timestamp: String,
    pub sender: Sender,
}

/// Metadata computed while processing a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Whitespace-delimited tokens in the filtered content.
    pub word_count: u32,
    /// Length of the filtered content in characters.
    pub character_count: u32,
    /// ISO-8601 UTC time the message was processed.
    pub processed_at: String,
}

/// A message after filtering and metadata derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedMessage {
    pub message_id: String,
    pub session_id: String,
    pub content: String,
    pub timestamp: String,
    pub sender: Sender,
    pub metadata: MessageMetadata,
}

/// Flattened storage representation of a [`ProcessedMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    pub message_id: String,
    pub session_id: String,
    pub content: String,
    pub timestamp: String,
    pub sender: Sender,
    pub word_count: u32,
    pub character_count: u32,
    pub processed_at: String,
}

impl From<ProcessedMessage> for MessageRow {
    fn from(msg: ProcessedMessage) -> Self {
        Self {
            message_id: msg.message_id,
            session_id: msg.session_id,
            content: msg.content,
            timestamp: msg.timestamp,
            sender: msg.sender,
            word_count: msg.metadata.word_count,
            character_count: msg.metadata.character_count,
            processed_at: msg.metadata.processed_at,
        }
    }
}

impl From<MessageRow> for ProcessedMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            message_id: row.message_id,
            session_id: row.session_id,
            content: row.content,
            timestamp: row.timestamp,
            sender: row.sender,
            metadata: MessageMetadata {
                word_count: row.word_count,
                character_count: row.character_count,
                processed_at: row.processed_at,
            },
        }
    }
}

/// One page of a session's message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMessages {
    pub messages: Vec<ProcessedMessage>,
    /// Number of messages matching the query, ignoring limit/offset.
    pub total: u64,
}
