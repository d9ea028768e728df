use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{AppState, Caller};
use crate::models::PlanRole;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success};

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    pub role: PlanRole,
}

pub async fn add_member(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<AddMemberRequest>,
) -> Result<Response, AppError> {
    let member = state
        .engine
        .add_member(plan_id, caller.0, body.user_id, body.role)
        .await?;
    Ok(created(member, "Member added").into_response())
}

pub async fn remove_member(
    State(state): State<AppState>,
    caller: Caller,
    Path((plan_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, AppError> {
    state.engine.remove_member(plan_id, caller.0, user_id).await?;
    Ok(empty_success("Member removed").into_response())
}
