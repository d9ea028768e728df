use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{AppState, Caller};
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success};

#[derive(Deserialize)]
pub struct AddResourceRequest {
    pub title: String,
    pub url: String,
}

pub async fn add_resource(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<AddResourceRequest>,
) -> Result<Response, AppError> {
    let resource = state
        .engine
        .add_resource(plan_id, caller.0, body.title, body.url)
        .await?;
    Ok(created(resource, "Resource added").into_response())
}

pub async fn remove_resource(
    State(state): State<AppState>,
    caller: Caller,
    Path((plan_id, resource_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, AppError> {
    state
        .engine
        .remove_resource(plan_id, caller.0, resource_id)
        .await?;
    Ok(empty_success("Resource removed").into_response())
}
