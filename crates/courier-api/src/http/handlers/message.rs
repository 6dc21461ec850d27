//! Message handlers for the REST API.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use courier_core::repository::message::MessageRepository;
use courier_types::error::ValidationError;
use courier_types::message::ProcessedMessage;
use courier_types::validation::validate_incoming;

use crate::http::error::AppError;
use crate::http::extractors::query::MessageListQuery;
use crate::http::response::{ApiResponse, Pagination};
use crate::state::AppState;

/// POST /api/messages - Validate, process and store a message.
pub async fn create_message<R: MessageRepository + 'static>(
    State(state): State<AppState<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProcessedMessage>>), AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable request body");
        ValidationError::new("body", "must be a valid JSON object")
    })?;

    let incoming = validate_incoming(&body)?;
    let created = state.message_service.create_message(incoming).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// GET /api/messages/{session_id} - Page through a session's history.
pub async fn get_session_messages<R: MessageRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(session_id): Path<String>,
    query: Result<Query<MessageListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ProcessedMessage>>>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable query string");
        ValidationError::new("query", "malformed query string")
    })?;
    let filter = query.into_filter(&state.pagination)?;

    let result = state
        .message_service
        .get_session_messages(&session_id, &filter)
        .await?;

    let pagination = Pagination {
        total: result.total,
        limit: filter.limit,
        offset: filter.offset,
    };
    Ok(Json(ApiResponse::paginated(result.messages, pagination)))
}
