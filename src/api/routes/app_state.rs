//! Application state management.
//!
//! Defines the AppState struct that holds all shared application state:
//! the form store, the LLM client, and the optional database connection.

use crate::services::llm_client::{GeminiClient, LlmClient};
use crate::storage::{FormStore, MemoryFormStore, StorageError};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend for form and conversation persistence
    pub store: Arc<dyn FormStore>,
    /// LLM text-completion client
    pub llm: Arc<dyn LlmClient>,
    /// PostgreSQL database connection pool (optional)
    pub database: Option<PgPool>,
}

impl AppState {
    /// Create a new application state with default values: in-memory
    /// storage and the environment-configured Gemini client.
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryFormStore::new()),
            llm: Arc::new(GeminiClient::new()),
            database: None,
        }
    }

    /// Create an application state from explicit parts. Used by tests to
    /// substitute stub stores and LLM clients.
    pub fn with_parts(store: Arc<dyn FormStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            store,
            llm,
            database: None,
        }
    }

    /// Initialize storage backend from environment configuration.
    ///
    /// Connects to PostgreSQL when DATABASE_URL is set, otherwise keeps
    /// the in-memory store.
    pub async fn init_storage(&mut self) -> Result<(), StorageError> {
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            match sqlx::PgPool::connect(&database_url).await {
                Ok(pool) => {
                    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
                        return Err(StorageError::ConnectionError(format!(
                            "Migration failed: {}",
                            e
                        )));
                    }

                    self.database = Some(pool.clone());
                    self.store = Arc::new(crate::storage::PostgresFormStore::new(pool));
                    Ok(())
                }
                Err(e) => Err(StorageError::ConnectionError(format!(
                    "Failed to connect to database: {}",
                    e
                ))),
            }
        } else {
            // In-memory storage (no database)
            Ok(())
        }
    }

    /// Get a reference to the database pool if available.
    pub fn database(&self) -> Option<&PgPool> {
        self.database.as_ref()
    }

    /// Check if PostgreSQL storage is enabled
    pub fn is_postgres(&self) -> bool {
        self.database.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
