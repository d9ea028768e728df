use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Checklist item under a plan. Completion is a plain boolean toggle,
/// independent of the plan's own lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanTask {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub assignee: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
