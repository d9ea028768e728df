use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    ApprovalVote, EventPlan, PlanMember, PlanResource, PlanStatus, PlanTask, VoteDecision,
};
use crate::utils::error::AppError;

pub mod pg;

pub use pg::PgPlanStore;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Partial update for plan fields. `None` leaves the column unchanged;
/// status is never part of a patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub budget_estimate: Option<Decimal>,
    pub school_year: Option<String>,
}

/// Persistence contract for the workflow engine. Lookups are key-based
/// (by plan id, or plan id + user id); no richer queries are required.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn insert_plan(&self, plan: &EventPlan) -> Result<(), AppError>;
    async fn get_plan(&self, id: Uuid) -> Result<Option<EventPlan>, AppError>;
    async fn list_plans(&self, school_year: Option<&str>) -> Result<Vec<EventPlan>, AppError>;
    /// Applies the patch only while the plan is still editable (draft or
    /// pending_approval). Returns false when the row was not updated, so an
    /// edit racing a concurrent decision cannot land after the lock.
    async fn update_fields(&self, id: Uuid, patch: &PlanPatch) -> Result<bool, AppError>;
    /// Compare-and-set on status. Returns false when the plan was no longer
    /// in `from`, so concurrent transitions cannot double-apply.
    async fn set_status_if(
        &self,
        id: Uuid,
        from: PlanStatus,
        to: PlanStatus,
    ) -> Result<bool, AppError>;

    async fn list_members(&self, plan_id: Uuid) -> Result<Vec<PlanMember>, AppError>;
    async fn get_member(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<PlanMember>, AppError>;
    async fn insert_member(&self, member: &PlanMember) -> Result<(), AppError>;
    async fn delete_member(&self, plan_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;
    async fn count_leads(&self, plan_id: Uuid) -> Result<i64, AppError>;

    async fn insert_task(&self, task: &PlanTask) -> Result<(), AppError>;
    async fn get_task(&self, plan_id: Uuid, task_id: Uuid) -> Result<Option<PlanTask>, AppError>;
    async fn list_tasks(&self, plan_id: Uuid) -> Result<Vec<PlanTask>, AppError>;
    async fn set_task_completed(
        &self,
        plan_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<(), AppError>;
    async fn set_task_assignee(
        &self,
        plan_id: Uuid,
        task_id: Uuid,
        assignee: Option<Uuid>,
    ) -> Result<(), AppError>;

    /// Moves the plan from `from` into `pending_approval` and resets its
    /// vote set, both inside one transaction. Returns false (and leaves the
    /// votes untouched) when the plan was no longer in `from`.
    async fn begin_review(&self, plan_id: Uuid, from: PlanStatus) -> Result<bool, AppError>;

    /// Upserts the voter's row (re-vote replaces) and returns the plan's
    /// full vote set, inside one transaction that holds a lock on the plan
    /// row. Concurrent voters on the same plan therefore serialize, and
    /// each aggregates over every vote committed before its own. When the
    /// plan has already left `pending_approval` the vote is not recorded
    /// and the decided status is returned with an empty vote set.
    async fn upsert_vote_and_list(
        &self,
        plan_id: Uuid,
        voter_id: Uuid,
        decision: VoteDecision,
    ) -> Result<(PlanStatus, Vec<ApprovalVote>), AppError>;
    async fn list_votes(&self, plan_id: Uuid) -> Result<Vec<ApprovalVote>, AppError>;

    async fn insert_resource(&self, resource: &PlanResource) -> Result<(), AppError>;
    async fn delete_resource(&self, plan_id: Uuid, resource_id: Uuid) -> Result<bool, AppError>;
    async fn list_resources(&self, plan_id: Uuid) -> Result<Vec<PlanResource>, AppError>;
}
