//! Message processing: validate -> filter -> derive metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use courier_types::error::MessageError;
use courier_types::message::{IncomingMessage, MessageMetadata, ProcessedMessage};

use super::filter::ContentFilter;

/// Source of the `processed_at` timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Turns validated client input into a [`ProcessedMessage`].
///
/// Deterministic apart from the clock: the same input and clock reading
/// always produce the same output.
#[derive(Debug, Clone)]
pub struct MessageProcessor<C: Clock = SystemClock> {
    filter: ContentFilter,
    clock: C,
}

impl MessageProcessor<SystemClock> {
    pub fn new(filter: ContentFilter) -> Self {
        Self::with_clock(filter, SystemClock)
    }
}

impl<C: Clock> MessageProcessor<C> {
    pub fn with_clock(filter: ContentFilter, clock: C) -> Self {
        Self { filter, clock }
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }

    /// Process a message.
    ///
    /// Fails with [`MessageError::InvalidFormat`] when the content is blank
    /// after trimming. Forbidden words are masked, never rejected.
    pub fn process(&self, input: IncomingMessage) -> Result<ProcessedMessage, MessageError> {
        if input.content.trim().is_empty() {
            return Err(MessageError::InvalidFormat(
                "Message content cannot be empty or whitespace only".to_string(),
            ));
        }

        let detection = self.filter.detect(&input.content);
        let content = if detection.found {
            tracing::debug!(
                message_id = %input.message_id,
                words = ?detection.matches,
                "masking forbidden words"
            );
            self.filter.mask(&input.content)
        } else {
            input.content
        };

        let metadata = self.metadata_for(&content);

        Ok(ProcessedMessage {
            message_id: input.message_id,
            session_id: input.session_id,
            content,
            timestamp: input.timestamp,
            sender: input.sender,
            metadata,
        })
    }

    fn metadata_for(&self, content: &str) -> MessageMetadata {
        MessageMetadata {
            word_count: saturating_u32(content.split_whitespace().count()),
            character_count: saturating_u32(content.chars().count()),
            processed_at: self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use courier_types::message::Sender;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn processor() -> MessageProcessor<FixedClock> {
        let at = Utc.with_ymd_and_hms(2023, 6, 15, 14, 30, 1).unwrap();
        MessageProcessor::with_clock(
            ContentFilter::new(["idiota", "mierda", "estupido"]),
            FixedClock(at),
        )
    }

    fn incoming(content: &str) -> IncomingMessage {
        IncomingMessage {
            message_id: "msg-123456".to_string(),
            session_id: "session-abcdef".to_string(),
            content: content.to_string(),
            timestamp: "2023-06-15T14:30:00Z".to_string(),
            sender: Sender::System,
        }
    }

    #[test]
    fn test_process_clean_message() {
        let msg = processor().process(incoming("Hola, como puedo ayudarte hoy?")).unwrap();
        assert_eq!(msg.content, "Hola, como puedo ayudarte hoy?");
        assert_eq!(msg.message_id, "msg-123456");
        assert_eq!(msg.session_id, "session-abcdef");
        assert_eq!(msg.timestamp, "2023-06-15T14:30:00Z");
        assert_eq!(msg.sender, Sender::System);
        assert_eq!(msg.metadata.word_count, 5);
        assert_eq!(msg.metadata.character_count, 30);
    }

    #[test]
    fn test_process_masks_forbidden_words() {
        let msg = processor().process(incoming("Eres un idiota")).unwrap();
        assert_eq!(msg.content, "Eres un ******");
        assert_eq!(msg.metadata.word_count, 3);
        assert_eq!(msg.metadata.character_count, 14);
    }

    #[test]
    fn test_process_rejects_blank_content() {
        for content in ["   ", "\n\t ", " \u{3000} "] {
            let err = processor().process(incoming(content)).unwrap_err();
            assert!(matches!(err, MessageError::InvalidFormat(_)));
        }
    }

    #[test]
    fn test_processed_at_is_utc_iso8601() {
        let msg = processor().process(incoming("hola")).unwrap();
        assert_eq!(msg.metadata.processed_at, "2023-06-15T14:30:01.000000+00:00");
    }

    #[test]
    fn test_system_clock_processed_at_parses() {
        let p = MessageProcessor::new(ContentFilter::default());
        let msg = p.process(incoming("hola")).unwrap();
        let parsed = DateTime::parse_from_rfc3339(&msg.metadata.processed_at).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_metadata_counts_follow_content() {
        let p = processor();
        for content in ["  leading and trailing  ", "uno\tdos\ntres", "ñandú estupido 🎉"] {
            let msg = p.process(incoming(content)).unwrap();
            assert_eq!(msg.metadata.character_count as usize, msg.content.chars().count());
            assert_eq!(
                msg.metadata.word_count as usize,
                msg.content.split_whitespace().count()
            );
        }
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let msg = processor().process(incoming("  hola  ")).unwrap();
        assert_eq!(msg.content, "  hola  ");
        assert_eq!(msg.metadata.character_count, 8);
        assert_eq!(msg.metadata.word_count, 1);
    }
}
