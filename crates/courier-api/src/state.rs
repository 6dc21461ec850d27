//! Application state wiring the message pipeline together.
//!
//! `AppState` is generic over the repository so the HTTP tests can run
//! against the in-memory store; the binary pins it to SQLite.

use std::path::Path;
use std::sync::Arc;

use courier_core::message::{ContentFilter, MessageProcessor};
use courier_core::repository::message::MessageRepository;
use courier_core::service::message::MessageService;
use courier_infra::sqlite::message::SqliteMessageRepository;
use courier_infra::sqlite::pool::DatabasePool;
use courier_types::config::{PaginationConfig, ServiceConfig};

/// Shared state handed to every HTTP handler.
pub struct AppState<R: MessageRepository = SqliteMessageRepository> {
    pub message_service: Arc<MessageService<R>>,
    pub pagination: PaginationConfig,
}

// Manual impl: `derive(Clone)` would demand `R: Clone`.
impl<R: MessageRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            message_service: Arc::clone(&self.message_service),
            pagination: self.pagination,
        }
    }
}

impl<R: MessageRepository> AppState<R> {
    /// Wire filter, processor and service on top of `repo`.
    pub fn new(repo: R, config: &ServiceConfig) -> Self {
        let filter = ContentFilter::from_config(config);
        tracing::debug!(words = filter.words().count(), "content filter ready");

        let processor = MessageProcessor::new(filter);
        Self {
            message_service: Arc::new(MessageService::new(repo, processor)),
            pagination: config.pagination,
        }
    }
}

impl AppState {
    /// Open the configured SQLite database and wire services on top of it.
    pub async fn init(config: &ServiceConfig) -> anyhow::Result<Self> {
        let pool = open_database(config).await?;
        Ok(Self::new(SqliteMessageRepository::new(pool), config))
    }

    pub fn db_pool(&self) -> &DatabasePool {
        self.message_service.repo().pool()
    }
}

/// Open (creating if needed) the database at `config.database_path` and run
/// migrations.
pub async fn open_database(config: &ServiceConfig) -> anyhow::Result<DatabasePool> {
    let path = Path::new(&config.database_path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = DatabasePool::open(path).await?;
    tracing::info!(path = %path.display(), "database opened");
    Ok(pool)
}
