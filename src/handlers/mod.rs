use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::workflow::WorkflowEngine;

pub mod members;
pub mod plans;
pub mod resources;
pub mod tasks;
pub mod votes;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
}

/// Authenticated caller identity, carried on the `x-user-id` header by the
/// portal's gateway. Identity verification itself happens upstream.
pub struct Caller(pub Uuid);

const USER_ID_HEADER: &str = "x-user-id";

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::AuthError("missing x-user-id header".to_string()))?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| AppError::AuthError("malformed x-user-id header".to_string()))?;

        Ok(Caller(user_id))
    }
}

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "dragonhub-api",
    };

    success(payload, "Health check successful").into_response()
}
