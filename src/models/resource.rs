use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A link attached to a plan (shared doc, signup sheet, venue page).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanResource {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub url: String,
    pub added_by: Uuid,
    pub created_at: DateTime<Utc>,
}
