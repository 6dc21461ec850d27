//! Message pipeline: content filtering and metadata derivation.
//!
//! - `filter` -- `ContentFilter` detecting and masking forbidden words
//! - `processor` -- `MessageProcessor` turning an `IncomingMessage` into a
//!   `ProcessedMessage`

pub mod filter;
pub mod processor;

pub use filter::{ContentFilter, Detection};
pub use processor::{Clock, MessageProcessor, SystemClock};
