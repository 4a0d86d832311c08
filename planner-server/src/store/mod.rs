//! Task persistence.
//!
//! The API only ever talks to a `TaskStore`. Ids are 24-hex ObjectIds in every
//! implementation, and an id that does not parse as one is a store error
//! rather than a miss.

mod memory;
mod mongo;

pub use memory::MemoryTaskStore;
pub use mongo::MongoTaskStore;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use planner_core::{Task, TaskDraft, TaskFilter};
use thiserror::Error;

use crate::config::{ServerConfig, StoreKind};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid task id '{0}'")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Insert did not return an ObjectId")]
    MissingId,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks matching `filter`, in insertion order.
    async fn find(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;

    /// Store a new task; the store picks the id and starts it incomplete.
    async fn insert(&self, draft: TaskDraft) -> StoreResult<Task>;

    /// Returns whether a task was removed.
    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;

    /// Set `completed` and return the updated task, `None` if the id matched nothing.
    async fn update_completion(&self, id: &str, completed: bool) -> StoreResult<Option<Task>>;

    async fn ping(&self) -> StoreResult<()>;
}

pub(crate) fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Build the store selected by the configuration.
pub async fn connect(config: &ServerConfig) -> anyhow::Result<Arc<dyn TaskStore>> {
    match &config.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory task store; tasks are lost on restart");
            Ok(Arc::new(MemoryTaskStore::new()))
        }
        StoreKind::Mongo { url, database } => {
            let store = MongoTaskStore::connect(url, database.as_deref()).await?;
            match store.ping().await {
                Ok(()) => tracing::info!(database = %store.database(), "MongoDB connected"),
                Err(e) => tracing::error!("MongoDB connection error: {e}"),
            }
            Ok(Arc::new(store))
        }
    }
}
