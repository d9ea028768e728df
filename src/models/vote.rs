use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VoteDecision {
    Approve,
    Reject,
}

/// One vote per (plan, board member); re-voting replaces the prior row.
/// Uniqueness is enforced by the storage layer, not just here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApprovalVote {
    pub plan_id: Uuid,
    pub voter_id: Uuid,
    pub decision: VoteDecision,
    pub cast_at: DateTime<Utc>,
}
