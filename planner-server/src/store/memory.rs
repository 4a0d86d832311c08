use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use planner_core::{Task, TaskDraft, TaskFilter};
use tokio::sync::RwLock;

use super::{StoreResult, TaskStore, parse_id};

/// Process-local task store. Same id rules as the MongoDB store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn insert(&self, draft: TaskDraft) -> StoreResult<Task> {
        let task = draft.into_task(ObjectId::new().to_hex());
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        parse_id(id)?;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }

    async fn update_completion(&self, id: &str, completed: bool) -> StoreResult<Option<Task>> {
        parse_id(id)?;
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.completed = completed;
            task.clone()
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use planner_core::Period;

    fn draft(date: &str, todo: &str) -> TaskDraft {
        TaskDraft {
            date: date.to_string(),
            todo: todo.to_string(),
            start_time: "08:00".to_string(),
            end_time: "10:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_incomplete() {
        let store = MemoryTaskStore::new();
        let task = store.insert(draft("2025-03-20", "Study")).await.unwrap();
        assert_eq!(task.id.len(), 24);
        assert!(!task.completed);
        assert_eq!(store.find(&TaskFilter::All).await.unwrap(), vec![task]);
    }

    #[tokio::test]
    async fn test_find_filters() {
        let store = MemoryTaskStore::new();
        store.insert(draft("2025-03-20", "a")).await.unwrap();
        store.insert(draft("2025-03-21", "b")).await.unwrap();
        store.insert(draft("2025-04-01", "c")).await.unwrap();

        let by_date = store.find(&TaskFilter::Date("2025-03-20".into())).await.unwrap();
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].todo, "a");

        let by_month = store
            .find(&TaskFilter::Month(Period::new(2025, 3).unwrap()))
            .await
            .unwrap();
        assert_eq!(by_month.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_only_removes_match() {
        let store = MemoryTaskStore::new();
        let a = store.insert(draft("2025-03-20", "a")).await.unwrap();
        let b = store.insert(draft("2025-03-20", "b")).await.unwrap();

        assert!(store.delete_by_id(&a.id).await.unwrap());
        assert!(!store.delete_by_id(&a.id).await.unwrap());
        assert_eq!(store.find(&TaskFilter::All).await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_malformed_id_is_an_error() {
        let store = MemoryTaskStore::new();
        assert!(matches!(
            store.delete_by_id("not-an-id").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.update_completion("not-an-id", true).await,
            Err(StoreError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_update_completion() {
        let store = MemoryTaskStore::new();
        let task = store.insert(draft("2025-03-20", "a")).await.unwrap();

        let updated = store.update_completion(&task.id, true).await.unwrap().unwrap();
        assert!(updated.completed);
        let again = store.update_completion(&task.id, true).await.unwrap().unwrap();
        assert!(again.completed);

        let unknown = ObjectId::new().to_hex();
        assert_eq!(store.update_completion(&unknown, true).await.unwrap(), None);
    }
}
