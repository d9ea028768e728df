use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Authorizer;
use crate::models::{
    ApprovalVote, EventPlan, PlanMember, PlanResource, PlanRole, PlanStatus, PlanTask,
    VoteDecision,
};
use crate::notify::InvalidationHook;
use crate::store::{PlanPatch, PlanStore};
use crate::utils::error::AppError;

/// Minimum count of approve votes needed to move a plan to `approved`.
pub const DEFAULT_APPROVAL_THRESHOLD: u32 = 2;

/// Governance knobs for the approval workflow.
///
/// Approval is asymmetric: acceptance needs `approval_threshold` positive
/// votes, while a single reject vote is a unilateral veto.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowPolicy {
    pub approval_threshold: u32,
    /// Whether a rejected plan may be revised and resubmitted.
    pub allow_resubmission: bool,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            allow_resubmission: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlan {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub budget_estimate: Option<Decimal>,
    pub school_year: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Full read-side view of one plan.
#[derive(Debug, Serialize)]
pub struct PlanDetail {
    pub plan: EventPlan,
    pub members: Vec<PlanMember>,
    pub tasks: Vec<PlanTask>,
    pub votes: Vec<ApprovalVote>,
    pub resources: Vec<PlanResource>,
}

/// Owns the event-plan lifecycle: draft -> pending_approval ->
/// approved/rejected -> completed, and every mutation guarded by it.
///
/// Collaborators are injected so the engine can be exercised against
/// in-memory fakes. The engine itself does no logging; errors carry
/// everything the caller needs.
pub struct WorkflowEngine {
    store: Arc<dyn PlanStore>,
    auth: Arc<dyn Authorizer>,
    hook: Arc<dyn InvalidationHook>,
    policy: WorkflowPolicy,
}

impl WorkflowEngine {
    pub fn new(
        store: Arc<dyn PlanStore>,
        auth: Arc<dyn Authorizer>,
        hook: Arc<dyn InvalidationHook>,
        policy: WorkflowPolicy,
    ) -> Self {
        Self {
            store,
            auth,
            hook,
            policy,
        }
    }

    // ---- plan lifecycle ----

    pub async fn create_plan(&self, creator: Uuid, fields: NewPlan) -> Result<EventPlan, AppError> {
        if fields.title.trim().is_empty() {
            return Err(AppError::ValidationError("title is required".to_string()));
        }

        let now = Utc::now();
        let plan = EventPlan {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            category: fields.category,
            event_date: fields.event_date,
            location: fields.location,
            budget_estimate: fields.budget_estimate,
            school_year: fields.school_year,
            created_by: creator,
            status: PlanStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_plan(&plan).await?;

        // The creator is an implicit lead of their own plan.
        self.store
            .insert_member(&PlanMember {
                plan_id: plan.id,
                user_id: creator,
                role: PlanRole::Lead,
                joined_at: now,
            })
            .await?;

        self.signal(plan.id).await;
        Ok(plan)
    }

    pub async fn update_plan_fields(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        patch: PlanPatch,
    ) -> Result<EventPlan, AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;
        if !plan.status.is_editable() {
            return Err(AppError::InvalidState(
                "plan fields are locked once the board has decided".to_string(),
            ));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(AppError::ValidationError("title is required".to_string()));
            }
        }

        // The store re-checks editability inside the UPDATE, so an edit
        // racing a concurrent board decision cannot land after the lock.
        let updated = self.store.update_fields(plan_id, &patch).await?;
        if !updated {
            return Err(AppError::InvalidState(
                "plan fields are locked once the board has decided".to_string(),
            ));
        }
        self.signal(plan_id).await;
        self.require_plan(plan_id).await
    }

    pub async fn submit_for_approval(
        &self,
        plan_id: Uuid,
        actor: Uuid,
    ) -> Result<EventPlan, AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;

        let resubmit = plan.status == PlanStatus::Rejected && self.policy.allow_resubmission;
        if plan.status != PlanStatus::Draft && !resubmit {
            return Err(AppError::InvalidState(format!(
                "plan cannot be submitted from status '{:?}'",
                plan.status
            )));
        }

        // Stale votes must not count toward the new review round. The flip
        // and the vote reset commit together, so a failed flip leaves the
        // prior round's votes intact.
        let flipped = self.store.begin_review(plan_id, plan.status).await?;
        if !flipped {
            return Err(AppError::InvalidState(
                "plan status changed while submitting".to_string(),
            ));
        }

        self.signal(plan_id).await;
        self.require_plan(plan_id).await
    }

    /// Records a board member's vote and applies the aggregate outcome.
    ///
    /// Reject is a veto: one reject vote moves the plan to `rejected`
    /// regardless of approvals on record. Approve flips the plan once the
    /// approve count reaches the policy threshold. The store call holds a
    /// lock on the plan row, so concurrent voters serialize and each
    /// aggregates over every vote committed before its own; the status flip
    /// itself is a compare-and-set. A veto that loses the decision race is
    /// surfaced to the caller rather than silently dropped.
    pub async fn cast_vote(
        &self,
        plan_id: Uuid,
        voter: Uuid,
        decision: VoteDecision,
    ) -> Result<EventPlan, AppError> {
        let plan = self.require_plan(plan_id).await?;
        if !self.auth.is_board_member(voter).await? {
            return Err(AppError::AuthError(
                "only board members may vote on plans".to_string(),
            ));
        }
        if plan.status != PlanStatus::PendingApproval {
            return Err(AppError::InvalidState(
                "plan is not awaiting board approval".to_string(),
            ));
        }

        let (status, votes) = self
            .store
            .upsert_vote_and_list(plan_id, voter, decision)
            .await?;
        if status != PlanStatus::PendingApproval {
            // Another request decided the plan first; the vote was not
            // recorded.
            return Err(AppError::InvalidState(
                "plan is no longer awaiting board approval".to_string(),
            ));
        }

        match decision {
            VoteDecision::Reject => {
                let flipped = self
                    .store
                    .set_status_if(plan_id, PlanStatus::PendingApproval, PlanStatus::Rejected)
                    .await?;
                if !flipped {
                    return Err(AppError::InvalidState(
                        "plan was decided before the veto could take effect".to_string(),
                    ));
                }
            }
            VoteDecision::Approve => {
                let approvals = votes
                    .iter()
                    .filter(|v| v.decision == VoteDecision::Approve)
                    .count() as u32;
                if approvals >= self.policy.approval_threshold {
                    // Losing this flip is fine: it means a veto landed
                    // first, and the veto wins.
                    self.store
                        .set_status_if(plan_id, PlanStatus::PendingApproval, PlanStatus::Approved)
                        .await?;
                }
            }
        }

        self.signal(plan_id).await;
        self.require_plan(plan_id).await
    }

    pub async fn mark_completed(&self, plan_id: Uuid, actor: Uuid) -> Result<EventPlan, AppError> {
        let plan = self.require_plan(plan_id).await?;

        let role = self.auth.plan_role(actor, plan_id).await?;
        let allowed = self.auth.is_board_member(actor).await? || role == Some(PlanRole::Lead);
        if !allowed {
            return Err(AppError::AuthError(
                "only a board member or a plan lead may mark a plan completed".to_string(),
            ));
        }
        if plan.status == PlanStatus::Completed {
            return Err(AppError::InvalidState(
                "plan is already completed".to_string(),
            ));
        }

        let flipped = self
            .store
            .set_status_if(plan_id, plan.status, PlanStatus::Completed)
            .await?;
        if !flipped {
            return Err(AppError::InvalidState(
                "plan status changed while completing".to_string(),
            ));
        }

        self.signal(plan_id).await;
        self.require_plan(plan_id).await
    }

    // ---- membership ----

    pub async fn add_member(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        user_id: Uuid,
        role: PlanRole,
    ) -> Result<PlanMember, AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;

        if self.store.get_member(plan_id, user_id).await?.is_some() {
            return Err(AppError::ValidationError(
                "user is already a member of this plan".to_string(),
            ));
        }

        let member = PlanMember {
            plan_id,
            user_id,
            role,
            joined_at: Utc::now(),
        };
        self.store.insert_member(&member).await?;
        self.signal(plan_id).await;
        Ok(member)
    }

    pub async fn remove_member(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;

        let member = self
            .store
            .get_member(plan_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("user '{}' is not a member of this plan", user_id))
            })?;

        // A plan must always keep at least one lead.
        if member.role == PlanRole::Lead && self.store.count_leads(plan_id).await? <= 1 {
            return Err(AppError::InvalidState(
                "cannot remove the last lead of a plan".to_string(),
            ));
        }

        self.store.delete_member(plan_id, user_id).await?;
        self.signal(plan_id).await;
        Ok(())
    }

    // ---- tasks ----

    pub async fn add_task(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        fields: NewTask,
    ) -> Result<PlanTask, AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;
        if fields.title.trim().is_empty() {
            return Err(AppError::ValidationError("title is required".to_string()));
        }
        if let Some(assignee) = fields.assignee {
            self.require_member(plan_id, assignee).await?;
        }

        let now = Utc::now();
        let task = PlanTask {
            id: Uuid::new_v4(),
            plan_id,
            title: fields.title,
            description: fields.description,
            completed: false,
            assignee: fields.assignee,
            due_date: fields.due_date,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_task(&task).await?;
        self.signal(plan_id).await;
        Ok(task)
    }

    /// Flips a task's completion flag. Any plan member may toggle; the
    /// plan's own status is not consulted.
    pub async fn toggle_task(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        task_id: Uuid,
    ) -> Result<PlanTask, AppError> {
        let plan = self.require_plan(plan_id).await?;
        let is_participant =
            plan.created_by == actor || self.auth.plan_role(actor, plan_id).await?.is_some();
        if !is_participant {
            return Err(AppError::AuthError(
                "only plan members may update tasks".to_string(),
            ));
        }

        let mut task = self.require_task(plan_id, task_id).await?;
        task.completed = !task.completed;
        self.store
            .set_task_completed(plan_id, task_id, task.completed)
            .await?;
        self.signal(plan_id).await;
        Ok(task)
    }

    pub async fn assign_task(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        task_id: Uuid,
        assignee: Option<Uuid>,
    ) -> Result<PlanTask, AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;
        let mut task = self.require_task(plan_id, task_id).await?;
        if let Some(user) = assignee {
            self.require_member(plan_id, user).await?;
        }

        task.assignee = assignee;
        self.store
            .set_task_assignee(plan_id, task_id, assignee)
            .await?;
        self.signal(plan_id).await;
        Ok(task)
    }

    // ---- resources ----

    pub async fn add_resource(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        title: String,
        url: String,
    ) -> Result<PlanResource, AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;
        if title.trim().is_empty() || url.trim().is_empty() {
            return Err(AppError::ValidationError(
                "resource title and url are required".to_string(),
            ));
        }

        let resource = PlanResource {
            id: Uuid::new_v4(),
            plan_id,
            title,
            url,
            added_by: actor,
            created_at: Utc::now(),
        };
        self.store.insert_resource(&resource).await?;
        self.signal(plan_id).await;
        Ok(resource)
    }

    pub async fn remove_resource(
        &self,
        plan_id: Uuid,
        actor: Uuid,
        resource_id: Uuid,
    ) -> Result<(), AppError> {
        let plan = self.require_plan(plan_id).await?;
        self.require_manager(&plan, actor).await?;

        let removed = self.store.delete_resource(plan_id, resource_id).await?;
        if !removed {
            return Err(AppError::NotFound(format!(
                "resource '{}' was not found on this plan",
                resource_id
            )));
        }
        self.signal(plan_id).await;
        Ok(())
    }

    // ---- read side ----

    pub async fn list_plans(&self, school_year: Option<&str>) -> Result<Vec<EventPlan>, AppError> {
        self.store.list_plans(school_year).await
    }

    pub async fn plan_detail(&self, plan_id: Uuid) -> Result<PlanDetail, AppError> {
        let plan = self.require_plan(plan_id).await?;
        let members = self.store.list_members(plan_id).await?;
        let tasks = self.store.list_tasks(plan_id).await?;
        let votes = self.store.list_votes(plan_id).await?;
        let resources = self.store.list_resources(plan_id).await?;
        Ok(PlanDetail {
            plan,
            members,
            tasks,
            votes,
            resources,
        })
    }

    // ---- guards ----

    async fn require_plan(&self, plan_id: Uuid) -> Result<EventPlan, AppError> {
        self.store
            .get_plan(plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("plan '{}' was not found", plan_id)))
    }

    async fn require_task(&self, plan_id: Uuid, task_id: Uuid) -> Result<PlanTask, AppError> {
        self.store
            .get_task(plan_id, task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task '{}' was not found", task_id)))
    }

    async fn require_member(&self, plan_id: Uuid, user_id: Uuid) -> Result<PlanMember, AppError> {
        self.store
            .get_member(plan_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::ValidationError("assignee must be a member of the plan".to_string())
            })
    }

    /// Creator or a lead member may manage a plan.
    async fn require_manager(&self, plan: &EventPlan, actor: Uuid) -> Result<(), AppError> {
        if plan.created_by == actor {
            return Ok(());
        }
        if self.auth.plan_role(actor, plan.id).await? == Some(PlanRole::Lead) {
            return Ok(());
        }
        Err(AppError::AuthError(
            "only the plan creator or a lead may do this".to_string(),
        ))
    }

    async fn signal(&self, plan_id: Uuid) {
        let paths = vec!["/plans".to_string(), format!("/plans/{}", plan_id)];
        self.hook.invalidate(&paths).await;
    }
}
