use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{AppState, Caller};
use crate::models::VoteDecision;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Deserialize)]
pub struct VoteRequest {
    pub decision: VoteDecision,
}

pub async fn cast_vote(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<VoteRequest>,
) -> Result<Response, AppError> {
    let plan = state
        .engine
        .cast_vote(plan_id, caller.0, body.decision)
        .await?;
    Ok(success(plan, "Vote recorded").into_response())
}
