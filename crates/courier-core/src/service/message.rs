//! Message service.
//!
//! Orchestrates the processor and the repository: incoming messages are
//! processed, flattened and persisted; session history is fetched, reshaped
//! into nested form, and an empty first page becomes `SessionNotFound`.

use courier_types::error::{MessageError, RepositoryError};
use courier_types::message::{IncomingMessage, MessageRow, ProcessedMessage, SessionMessages};
use tracing::{debug, info};

use crate::message::processor::{Clock, MessageProcessor, SystemClock};
use crate::repository::message::{MessageFilter, MessageRepository};

/// Service exposing the message use cases to the API layer.
///
/// Generic over `MessageRepository` so tests can swap in an in-memory store
/// (courier-core never depends on courier-infra).
pub struct MessageService<R: MessageRepository, C: Clock = SystemClock> {
    repo: R,
    processor: MessageProcessor<C>,
}

impl<R: MessageRepository, C: Clock> MessageService<R, C> {
    pub fn new(repo: R, processor: MessageProcessor<C>) -> Self {
        Self { repo, processor }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Process and persist a message, returning the stored shape.
    ///
    /// Errors: `InvalidFormat` for blank content, `DuplicateMessage` when the
    /// id is taken, `StorageError` for anything else the store reports.
    pub async fn create_message(
        &self,
        input: IncomingMessage,
    ) -> Result<ProcessedMessage, MessageError> {
        let processed = self.processor.process(input)?;
        let row = MessageRow::from(processed.clone());

        self.repo.save(&row).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                MessageError::DuplicateMessage(processed.message_id.clone())
            }
            other => MessageError::StorageError(other.to_string()),
        })?;

        info!(
            message_id = %processed.message_id,
            session_id = %processed.session_id,
            sender = %processed.sender,
            "message stored"
        );
        Ok(processed)
    }

    /// Fetch one page of a session's history.
    ///
    /// Fails with `SessionNotFound` only when nothing matches and the caller
    /// asked for the first page; paging past the end of an existing session
    /// yields an empty list with the real total.
    pub async fn get_session_messages(
        &self,
        session_id: &str,
        filter: &MessageFilter,
    ) -> Result<SessionMessages, MessageError> {
        let page = self
            .repo
            .fetch_by_session(session_id, filter)
            .await
            .map_err(|e| MessageError::StorageError(e.to_string()))?;

        if page.total == 0 && filter.offset == 0 {
            return Err(MessageError::SessionNotFound(session_id.to_string()));
        }

        debug!(
            session_id,
            total = page.total,
            returned = page.rows.len(),
            "session messages fetched"
        );

        Ok(SessionMessages {
            messages: page.rows.into_iter().map(ProcessedMessage::from).collect(),
            total: page.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use courier_types::message::Sender;

    use crate::message::filter::ContentFilter;
    use crate::repository::message::MessagePage;

    // --- Mock repository for testing ---

    /// Vec-backed store with optional injected failure.
    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<Vec<MessageRow>>,
        fail_with: Option<&'static str>,
    }

    impl MockRepository {
        fn failing(reason: &'static str) -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                fail_with: Some(reason),
            }
        }
    }

    impl MessageRepository for MockRepository {
        async fn save(&self, row: &MessageRow) -> Result<(), RepositoryError> {
            if let Some(reason) = self.fail_with {
                return Err(RepositoryError::Query(reason.to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|r| r.message_id == row.message_id) {
                return Err(RepositoryError::Conflict(row.message_id.clone()));
            }
            rows.push(row.clone());
            Ok(())
        }

        async fn fetch_by_session(
            &self,
            session_id: &str,
            filter: &MessageFilter,
        ) -> Result<MessagePage, RepositoryError> {
            if let Some(reason) = self.fail_with {
                return Err(RepositoryError::Query(reason.to_string()));
            }
            let mut matching: Vec<MessageRow> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.session_id == session_id)
                .filter(|r| filter.sender.is_none_or(|s| r.sender == s))
                .cloned()
                .collect();
            // Stable sort keeps insertion order for equal timestamps.
            matching.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            let total = matching.len() as u64;
            let rows = matching
                .into_iter()
                .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
                .take(filter.limit as usize)
                .collect();
            Ok(MessagePage { rows, total })
        }
    }

    // --- Helpers ---

    fn service(repo: MockRepository) -> MessageService<MockRepository> {
        let filter = ContentFilter::new(["idiota", "mierda", "estupido"]);
        MessageService::new(repo, MessageProcessor::new(filter))
    }

    fn incoming(id: &str, session: &str, timestamp: &str, sender: Sender) -> IncomingMessage {
        IncomingMessage {
            message_id: id.to_string(),
            session_id: session.to_string(),
            content: "Mensaje de prueba".to_string(),
            timestamp: timestamp.to_string(),
            sender,
        }
    }

    fn page(limit: u32, offset: u64) -> MessageFilter {
        MessageFilter {
            sender: None,
            limit,
            offset,
        }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_create_message_persists_flattened_row() {
        let svc = service(MockRepository::default());
        let mut msg = incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User);
        msg.content = "Eres un idiota".to_string();

        let created = svc.create_message(msg).await.unwrap();
        assert_eq!(created.content, "Eres un ******");
        assert_eq!(created.metadata.word_count, 3);

        let rows = svc.repo().rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "Eres un ******");
        assert_eq!(rows[0].word_count, 3);
        assert_eq!(rows[0].processed_at, created.metadata.processed_at);
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let svc = service(MockRepository::default());
        svc.create_message(incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User))
            .await
            .unwrap();

        let err = svc
            .create_message(incoming("m1", "other", "2023-06-15T14:31:00Z", Sender::System))
            .await
            .unwrap_err();
        assert!(matches!(err, MessageError::DuplicateMessage(ref id) if id == "m1"));
        assert_eq!(svc.repo().rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_blank_content_is_not_persisted() {
        let svc = service(MockRepository::default());
        let mut msg = incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User);
        msg.content = "   ".to_string();

        let err = svc.create_message(msg).await.unwrap_err();
        assert!(matches!(err, MessageError::InvalidFormat(_)));
        assert!(svc.repo().rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_storage_error() {
        let svc = service(MockRepository::failing("disk full"));
        let err = svc
            .create_message(incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User))
            .await
            .unwrap_err();
        assert!(matches!(err, MessageError::StorageError(_)));

        let err = svc.get_session_messages("s", &page(10, 0)).await.unwrap_err();
        assert!(matches!(err, MessageError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_round_trip_returns_created_message() {
        let svc = service(MockRepository::default());
        let created = svc
            .create_message(incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User))
            .await
            .unwrap();

        let result = svc.get_session_messages("s", &page(50, 0)).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.messages, vec![created]);
    }

    #[tokio::test]
    async fn test_unknown_session_first_page_is_not_found() {
        let svc = service(MockRepository::default());
        let err = svc.get_session_messages("none", &page(50, 0)).await.unwrap_err();
        assert!(matches!(err, MessageError::SessionNotFound(ref s) if s == "none"));
    }

    #[tokio::test]
    async fn test_unknown_session_with_offset_is_empty_page() {
        let svc = service(MockRepository::default());
        let result = svc.get_session_messages("none", &page(50, 5)).await.unwrap();
        assert!(result.messages.is_empty());
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn test_offset_past_end_of_existing_session() {
        let svc = service(MockRepository::default());
        for i in 0..3 {
            let msg = incoming(&format!("m{i}"), "s", "2023-06-15T14:30:00Z", Sender::User);
            svc.create_message(msg).await.unwrap();
        }
        let result = svc.get_session_messages("s", &page(10, 10)).await.unwrap();
        assert!(result.messages.is_empty());
        assert_eq!(result.total, 3);
    }

    #[tokio::test]
    async fn test_pagination_follows_timestamp_order() {
        let svc = service(MockRepository::default());
        // Inserted out of order on purpose.
        for (id, minute) in [("m3", 3), ("m1", 1), ("m5", 5), ("m2", 2), ("m4", 4)] {
            let ts = format!("2023-06-15T14:0{minute}:00Z");
            svc.create_message(incoming(id, "s", &ts, Sender::User))
                .await
                .unwrap();
        }

        let result = svc.get_session_messages("s", &page(2, 3)).await.unwrap();
        let ids: Vec<&str> = result.messages.iter().map(|m| m.message_id.as_str()).collect();
        assert_eq!(ids, vec!["m4", "m5"]);
        assert_eq!(result.total, 5);
    }

    #[tokio::test]
    async fn test_sender_filter_scopes_total() {
        let svc = service(MockRepository::default());
        svc.create_message(incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User))
            .await
            .unwrap();
        svc.create_message(incoming("m2", "s", "2023-06-15T14:31:00Z", Sender::System))
            .await
            .unwrap();

        let filter = MessageFilter {
            sender: Some(Sender::System),
            limit: 50,
            offset: 0,
        };
        let result = svc.get_session_messages("s", &filter).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.messages[0].sender, Sender::System);
    }

    #[tokio::test]
    async fn test_sender_filter_with_no_matches_is_not_found() {
        let svc = service(MockRepository::default());
        svc.create_message(incoming("m1", "s", "2023-06-15T14:30:00Z", Sender::User))
            .await
            .unwrap();

        let filter = MessageFilter {
            sender: Some(Sender::System),
            limit: 50,
            offset: 0,
        };
        let err = svc.get_session_messages("s", &filter).await.unwrap_err();
        assert!(matches!(err, MessageError::SessionNotFound(_)));
    }
}
