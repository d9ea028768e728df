use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Plan-scoped role. `Lead` carries edit/submit authority over that plan;
/// distinct from the organization-wide board-officer role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanRole {
    Lead,
    Member,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanMember {
    pub plan_id: Uuid,
    pub user_id: Uuid,
    pub role: PlanRole,
    pub joined_at: DateTime<Utc>,
}
