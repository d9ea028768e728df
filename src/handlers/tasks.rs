use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{AppState, Caller};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::workflow::NewTask;

pub async fn create_task(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<NewTask>,
) -> Result<Response, AppError> {
    let task = state.engine.add_task(plan_id, caller.0, body).await?;
    Ok(created(task, "Task created").into_response())
}

pub async fn toggle_task(
    State(state): State<AppState>,
    caller: Caller,
    Path((plan_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, AppError> {
    let task = state.engine.toggle_task(plan_id, caller.0, task_id).await?;
    Ok(success(task, "Task status updated").into_response())
}

#[derive(Deserialize)]
pub struct AssignTaskRequest {
    pub assignee: Option<Uuid>,
}

pub async fn assign_task(
    State(state): State<AppState>,
    caller: Caller,
    Path((plan_id, task_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<AssignTaskRequest>,
) -> Result<Response, AppError> {
    let task = state
        .engine
        .assign_task(plan_id, caller.0, task_id, body.assignee)
        .await?;
    Ok(success(task, "Task assignee updated").into_response())
}
