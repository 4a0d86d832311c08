//! HTTP client for the planner-server /plan API

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use planner_core::{CompletionUpdate, Task, TaskDraft, TaskFilter};
use reqwest::{Response, StatusCode};
use serde::Deserialize;

const HEALTH_TIMEOUT_SECS: u64 = 2;

/// The four task operations the calendar needs from the server.
#[async_trait]
pub trait PlanApi: Send + Sync {
    /// GET /plan
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// POST /plan
    async fn create_task(&self, draft: &TaskDraft) -> Result<()>;

    /// DELETE /plan/:id - `false` when the server has no such task
    async fn delete_task(&self, id: &str) -> Result<bool>;

    /// PATCH /plan/:id with `completed: true`
    async fn complete_task(&self, id: &str) -> Result<Option<Task>>;
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for planner-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Client {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health
    pub async fn health(&self) -> Result<()> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            anyhow::bail!("{}", error_message(resp).await);
        }
        Ok(())
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/plan/{}", self.base_url, id)
    }
}

#[async_trait]
impl PlanApi for Client {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let resp = self
            .http
            .get(format!("{}/plan", self.base_url))
            .query(&filter.query_pairs())
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            anyhow::bail!("{}", error_message(resp).await);
        }

        Ok(resp.json().await?)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}/plan", self.base_url))
            .json(draft)
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            anyhow::bail!("{}", error_message(resp).await);
        }

        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<bool> {
        let resp = self
            .http
            .delete(self.task_url(id))
            .send()
            .await
            .context("Failed to connect to server")?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => anyhow::bail!("{}", error_message(resp).await),
        }
    }

    async fn complete_task(&self, id: &str) -> Result<Option<Task>> {
        let resp = self
            .http
            .patch(self.task_url(id))
            .json(&CompletionUpdate { completed: true })
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            anyhow::bail!("{}", error_message(resp).await);
        }

        Ok(resp.json().await?)
    }
}

/// The server's explanation for a failed request: the JSON `error` field when
/// there is one, otherwise the raw body, otherwise the status line.
async fn error_message(resp: Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    parse_error_body(status, &body)
}

fn parse_error_body(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return err.error;
    }
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    }
}
