use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{AppState, Caller};
use crate::store::PlanPatch;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::workflow::NewPlan;

#[derive(Deserialize)]
pub struct ListPlansQuery {
    pub school_year: Option<String>,
}

pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<ListPlansQuery>,
) -> Result<Response, AppError> {
    let plans = state.engine.list_plans(query.school_year.as_deref()).await?;
    Ok(success(plans, "Plans retrieved").into_response())
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let detail = state.engine.plan_detail(plan_id).await?;
    Ok(success(detail, "Plan retrieved").into_response())
}

pub async fn create_plan(
    State(state): State<AppState>,
    caller: Caller,
    Json(body): Json<NewPlan>,
) -> Result<Response, AppError> {
    let plan = state.engine.create_plan(caller.0, body).await?;
    Ok(created(plan, "Plan created").into_response())
}

pub async fn update_plan(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
    Json(patch): Json<PlanPatch>,
) -> Result<Response, AppError> {
    let plan = state
        .engine
        .update_plan_fields(plan_id, caller.0, patch)
        .await?;
    Ok(success(plan, "Plan updated").into_response())
}

pub async fn submit_plan(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let plan = state.engine.submit_for_approval(plan_id, caller.0).await?;
    Ok(success(plan, "Plan submitted for board approval").into_response())
}

pub async fn complete_plan(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let plan = state.engine.mark_completed(plan_id, caller.0).await?;
    Ok(success(plan, "Plan marked completed").into_response())
}
