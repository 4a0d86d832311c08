//! Task endpoints under /plan

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use planner_core::{
    CompletionUpdate, Period, PlannerError, Task, TaskDraft, TaskFilter, validate_draft,
};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plan", get(list_tasks).post(create_task))
        .route("/plan/{task_id}", delete(delete_task).patch(complete_task))
}

/// Query parameters for listing. `date` wins over `month` when both are given.
#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub date: Option<String>,
    pub month: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> Result<TaskFilter, PlannerError> {
        match (self.date, self.month) {
            (Some(date), _) => Ok(TaskFilter::Date(date)),
            (None, Some(month)) => Ok(TaskFilter::Month(month.parse::<Period>()?)),
            (None, None) => Ok(TaskFilter::All),
        }
    }
}

/// GET /plan - List tasks, optionally for one day or one month
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let filter = query
        .into_filter()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let tasks = state.store().find(&filter).await?;
    tracing::debug!(?filter, count = tasks.len(), "listed tasks");

    Ok(Json(tasks))
}

/// POST /plan - Create a task
async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> Result<StatusCode, AppError> {
    validate_draft(&draft).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let task = state.store().insert(draft).await?;
    tracing::info!(id = %task.id, date = %task.date, "created task");

    Ok(StatusCode::CREATED)
}

/// DELETE /plan/:task_id - Remove a task
async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store().delete_by_id(&task_id).await? {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    tracing::info!(id = %task_id, "deleted task");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /plan/:task_id - Set a task's completion; `null` when the id matches nothing
async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(update): Json<CompletionUpdate>,
) -> Result<Json<Option<Task>>, AppError> {
    let updated = state
        .store()
        .update_completion(&task_id, update.completed)
        .await?;

    if updated.is_some() {
        tracing::info!(id = %task_id, completed = update.completed, "updated task");
    }

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, Response};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::app;
    use crate::store::MemoryTaskStore;

    fn test_app() -> Router {
        app(AppState::new(Arc::new(MemoryTaskStore::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn list(app: &Router, uri: &str) -> Vec<Task> {
        let response = send(app, Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn create(app: &Router, date: &str, todo: &str, start: &str, end: &str) -> StatusCode {
        let body = json!({ "date": date, "todo": todo, "startTime": start, "endTime": end });
        send(app, Method::POST, "/plan", Some(body)).await.status()
    }

    #[tokio::test]
    async fn test_create_then_list_round_trips() {
        let app = test_app();
        let response = send(
            &app,
            Method::POST,
            "/plan",
            Some(json!({ "date": "2025-03-20", "todo": "Study", "startTime": "10:00", "endTime": "12:00" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_bytes(response).await.is_empty());

        let tasks = list(&app, "/plan").await;
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.date, "2025-03-20");
        assert_eq!(task.todo, "Study");
        assert_eq!(task.start_time, "10:00");
        assert_eq!(task.end_time, "12:00");
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn test_list_uses_wire_field_names() {
        let app = test_app();
        create(&app, "2025-03-20", "Study", "10:00", "12:00").await;
        let response = send(&app, Method::GET, "/plan", None).await;
        let json = body_json(response).await;
        let task = &json[0];
        for key in ["_id", "date", "todo", "startTime", "endTime", "completed"] {
            assert!(task.get(key).is_some(), "missing {key}");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_drafts() {
        let app = test_app();
        let cases = [
            ("", "10:00", "12:00", "Please provide task name, start time, and end time"),
            ("Study", "24:00", "12:00", "Please provide valid start and end time in HH:MM format"),
            ("Study", "14:00", "13:00", "End time must be after start time"),
            ("Study", "10:00", "11:00", "The task duration must be at least 2 hours"),
        ];
        for (todo, start, end, message) in cases {
            let body = json!({ "date": "2025-03-20", "todo": todo, "startTime": start, "endTime": end });
            let response = send(&app, Method::POST, "/plan", Some(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["error"], message);
        }
        assert!(list(&app, "/plan").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_is_bad_request() {
        let app = test_app();
        let response = send(&app, Method::POST, "/plan", Some(json!({ "date": "2025-03-20" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_accepts_blank_but_non_empty_name() {
        let app = test_app();
        assert_eq!(create(&app, "2025-03-20", "   ", "10:00", "12:00").await, StatusCode::CREATED);
        assert_eq!(list(&app, "/plan").await[0].todo, "   ");
    }

    #[tokio::test]
    async fn test_duplicate_creates_are_kept() {
        let app = test_app();
        for _ in 0..2 {
            assert_eq!(create(&app, "2025-03-20", "Study", "10:00", "12:00").await, StatusCode::CREATED);
        }
        assert_eq!(list(&app, "/plan").await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_date_and_month() {
        let app = test_app();
        create(&app, "2025-03-20", "a", "10:00", "12:00").await;
        create(&app, "2025-03-21", "b", "10:00", "12:00").await;
        create(&app, "2025-04-20", "c", "10:00", "12:00").await;

        let by_date = list(&app, "/plan?date=2025-03-20").await;
        assert_eq!(by_date.len(), 1);
        assert!(by_date.iter().all(|t| t.date == "2025-03-20"));

        assert_eq!(list(&app, "/plan?month=2025-03").await.len(), 2);
        assert_eq!(list(&app, "/plan").await.len(), 3);

        let response = send(&app, Method::GET, "/plan?month=March", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_known_and_unknown_ids() {
        let app = test_app();
        create(&app, "2025-03-20", "a", "10:00", "12:00").await;
        create(&app, "2025-03-20", "b", "10:00", "12:00").await;
        let tasks = list(&app, "/plan").await;

        let response = send(&app, Method::DELETE, &format!("/plan/{}", tasks[0].id), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let remaining = list(&app, "/plan").await;
        assert_eq!(remaining, vec![tasks[1].clone()]);

        let unknown = ObjectId::new().to_hex();
        let response = send(&app, Method::DELETE, &format!("/plan/{unknown}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Task not found" }));
        assert_eq!(list(&app, "/plan").await, remaining);
    }

    #[tokio::test]
    async fn test_delete_malformed_id_is_server_error() {
        let app = test_app();
        let response = send(&app, Method::DELETE, "/plan/not-an-id", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("not-an-id"));
    }

    #[tokio::test]
    async fn test_complete_is_idempotent() {
        let app = test_app();
        create(&app, "2025-03-20", "a", "10:00", "12:00").await;
        let id = list(&app, "/plan").await[0].id.clone();

        for _ in 0..2 {
            let response = send(
                &app,
                Method::PATCH,
                &format!("/plan/{id}"),
                Some(json!({ "completed": true })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            let task: Task = serde_json::from_slice(&body_bytes(response).await).unwrap();
            assert_eq!(task.id, id);
            assert!(task.completed);
        }
        assert!(list(&app, "/plan").await[0].completed);
    }

    #[tokio::test]
    async fn test_complete_unknown_id_returns_null() {
        let app = test_app();
        let unknown = ObjectId::new().to_hex();
        let response = send(
            &app,
            Method::PATCH,
            &format!("/plan/{unknown}"),
            Some(json!({ "completed": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Value::Null);
    }

    #[tokio::test]
    async fn test_health_and_fallback() {
        let app = test_app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));

        let response = send(&app, Method::GET, "/nowhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Resource not found");
    }
}
