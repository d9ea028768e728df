use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of an event plan. Exactly one at a time; transitions
/// are owned by the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
    Completed,
}

impl PlanStatus {
    /// Field edits are only accepted before the board has decided.
    pub fn is_editable(&self) -> bool {
        matches!(self, PlanStatus::Draft | PlanStatus::PendingApproval)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventPlan {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub budget_estimate: Option<Decimal>,
    pub school_year: String,
    pub created_by: Uuid,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
