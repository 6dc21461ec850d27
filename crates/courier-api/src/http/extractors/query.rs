//! Query parameter parsing for the session history endpoint.
//!
//! Parameters arrive as raw strings so a bad value can be reported as a
//! `VALIDATION_ERROR` naming the parameter, instead of a generic rejection.

use serde::Deserialize;

use courier_core::repository::message::MessageFilter;
use courier_types::config::PaginationConfig;
use courier_types::error::ValidationError;
use courier_types::message::Sender;

/// Query parameters for `GET /api/messages/{session_id}`.
#[derive(Debug, Deserialize, Default)]
pub struct MessageListQuery {
    /// Maximum results (default from config, 1..=max_limit).
    pub limit: Option<String>,
    /// Results to skip (default 0).
    pub offset: Option<String>,
    /// Only messages from this sender (`user` or `system`).
    pub sender: Option<String>,
}

impl MessageListQuery {
    /// Validate the raw parameters against the pagination limits.
    pub fn into_filter(
        self,
        pagination: &PaginationConfig,
    ) -> Result<MessageFilter, ValidationError> {
        let limit = match self.limit.as_deref() {
            None => pagination.default_limit,
            Some(raw) => {
                let value = parse_integer("limit", raw)?;
                if value < 1 || value > i128::from(pagination.max_limit) {
                    return Err(ValidationError::new(
                        "limit",
                        format!("must be between 1 and {}", pagination.max_limit),
                    ));
                }
                value as u32
            }
        };

        let offset = match self.offset.as_deref() {
            None => 0,
            Some(raw) => {
                let value = parse_integer("offset", raw)?;
                if value < 0 {
                    return Err(ValidationError::new(
                        "offset",
                        "must be greater than or equal to 0",
                    ));
                }
                // Saturates; such an offset is past the end of any session.
                u64::try_from(value).unwrap_or(u64::MAX)
            }
        };

        let sender = match self.sender.as_deref() {
            None => None,
            Some(raw) => Some(
                raw.parse::<Sender>()
                    .map_err(|_| ValidationError::new("sender", "must be one of: user, system"))?,
            ),
        };

        Ok(MessageFilter {
            sender,
            limit,
            offset,
        })
    }
}

fn parse_integer(field: &str, raw: &str) -> Result<i128, ValidationError> {
    raw.trim()
        .parse::<i128>()
        .map_err(|_| ValidationError::new(field, "must be an integer"))
}
