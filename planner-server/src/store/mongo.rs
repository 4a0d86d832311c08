use async_trait::async_trait;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection};
use planner_core::{Task, TaskDraft, TaskFilter};
use serde::{Deserialize, Serialize};

use super::{StoreError, StoreResult, TaskStore, parse_id};

const COLLECTION_NAME: &str = "tasks";
const DEFAULT_DATABASE: &str = "planner";

/// A task as stored in MongoDB.
#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    todo: String,
    #[serde(rename = "startTime", default)]
    start_time: String,
    #[serde(rename = "endTime", default)]
    end_time: String,
    #[serde(default)]
    completed: bool,
}

impl From<TaskDraft> for TaskDocument {
    fn from(draft: TaskDraft) -> Self {
        TaskDocument {
            id: None,
            date: draft.date,
            todo: draft.todo,
            start_time: draft.start_time,
            end_time: draft.end_time,
            completed: false,
        }
    }
}

impl From<TaskDocument> for Task {
    fn from(doc: TaskDocument) -> Self {
        Task {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            date: doc.date,
            todo: doc.todo,
            start_time: doc.start_time,
            end_time: doc.end_time,
            completed: doc.completed,
        }
    }
}

/// Translate a listing filter into a query on the `date` field.
fn filter_document(filter: &TaskFilter) -> Document {
    match filter {
        TaskFilter::All => doc! {},
        TaskFilter::Date(date) => doc! { "date": date.as_str() },
        // the prefix is digits and dashes only, safe to anchor as-is
        TaskFilter::Month(period) => doc! { "date": { "$regex": format!("^{}", period.date_prefix()) } },
    }
}

/// An explicit name wins, then the database in the connection string, then `planner`.
fn database_name(explicit: Option<&str>, options: &ClientOptions) -> String {
    explicit
        .or(options.default_database.as_deref())
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[derive(Clone, Debug)]
pub struct MongoTaskStore {
    client: Client,
    database: String,
}

impl MongoTaskStore {
    /// Parse the connection string and build a client. No round trip happens
    /// until the first query.
    pub async fn connect(url: &str, database: Option<&str>) -> StoreResult<Self> {
        let options = ClientOptions::parse(url).await?;
        let database = database_name(database, &options);
        let client = Client::with_options(options)?;
        Ok(MongoTaskStore { client, database })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn tasks(&self) -> Collection<TaskDocument> {
        self.client.database(&self.database).collection(COLLECTION_NAME)
    }
}

#[async_trait]
impl TaskStore for MongoTaskStore {
    async fn find(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let mut cursor = self.tasks().find(filter_document(filter), None).await?;
        let mut tasks: Vec<Task> = Vec::new();
        while cursor.advance().await? {
            tasks.push(Task::from(cursor.deserialize_current()?));
        }
        Ok(tasks)
    }

    async fn insert(&self, draft: TaskDraft) -> StoreResult<Task> {
        let document = TaskDocument::from(draft);
        let result = self.tasks().insert_one(&document, None).await?;
        let id = result.inserted_id.as_object_id().ok_or(StoreError::MissingId)?;
        Ok(TaskDocument {
            id: Some(id),
            ..document
        }
        .into())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let result = self.tasks().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn update_completion(&self, id: &str, completed: bool) -> StoreResult<Option<Task>> {
        let id = parse_id(id)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .tasks()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "completed": completed } },
                options,
            )
            .await?;
        Ok(updated.map(Task::from))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}
