use anyhow::Context;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use rusqlite::Connection;
use serde::Serialize;

use super::error::ApiError;
use super::AppState;
use crate::model::{Changes, NewTask, Task, TaskPatch};
use crate::ops;
use crate::validate::validate_patch;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Run one store operation on the blocking pool.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> anyhow::Result<T> + Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || store.with_conn(f))
        .await
        .context("store worker panicked")?;
    Ok(result?)
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = with_store(&state, ops::list_tasks).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(new) = payload?;
    let task = with_store(&state, move |conn| ops::create_task(conn, &new)).await?;
    log::info!("created task {}", task.id);
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Changes>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    validate_patch(&patch).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let changes = with_store(&state, move |conn| ops::update_task(conn, id, &patch)).await?;
    Ok(Json(Changes {
        message: "Task updated".into(),
        changes,
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Changes>, ApiError> {
    let Path(id) = id?;
    let changes = with_store(&state, move |conn| ops::delete_task(conn, id)).await?;
    Ok(Json(Changes {
        message: "Task deleted".into(),
        changes,
    }))
}
