use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};

use crate::api::ErrorBody;
use crate::model::{Changes, NewTask, Task, TaskPatch};

/// The task operations as seen from a client.
pub trait TaskApi {
    fn list(&self) -> Result<Vec<Task>>;
    fn create(&self, task: &NewTask) -> Result<Task>;
    fn update(&self, id: i64, patch: &TaskPatch) -> Result<Changes>;
    fn delete(&self, id: i64) -> Result<Changes>;
}

/// Talks to the REST API rooted at `base_url` (e.g. `http://localhost:5001/api/tasks`).
pub struct HttpClient {
    base_url: String,
    http: Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }
}

/// Turn a non-success response into an error carrying the server's message.
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => bail!("server returned {status}: {}", body.error),
        Err(_) => bail!("server returned {status}"),
    }
}

impl TaskApi for HttpClient {
    fn list(&self) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .context("failed to fetch tasks")?;
        check(response)?.json().context("invalid task list")
    }

    fn create(&self, task: &NewTask) -> Result<Task> {
        let response = self
            .http
            .post(&self.base_url)
            .json(task)
            .send()
            .context("failed to add task")?;
        check(response)?.json().context("invalid created task")
    }

    fn update(&self, id: i64, patch: &TaskPatch) -> Result<Changes> {
        let response = self
            .http
            .put(self.task_url(id))
            .json(patch)
            .send()
            .with_context(|| format!("failed to update task {id}"))?;
        check(response)?.json().context("invalid update response")
    }

    fn delete(&self, id: i64) -> Result<Changes> {
        let response = self
            .http
            .delete(self.task_url(id))
            .send()
            .with_context(|| format!("failed to delete task {id}"))?;
        check(response)?.json().context("invalid delete response")
    }
}
