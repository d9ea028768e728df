use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    ApprovalVote, EventPlan, PlanMember, PlanResource, PlanStatus, PlanTask, VoteDecision,
};
use crate::store::{PlanPatch, PlanStore};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn insert_plan(&self, plan: &EventPlan) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO event_plans
                (id, title, description, category, event_date, location,
                 budget_estimate, school_year, created_by, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(plan.id)
        .bind(&plan.title)
        .bind(&plan.description)
        .bind(&plan.category)
        .bind(plan.event_date)
        .bind(&plan.location)
        .bind(plan.budget_estimate)
        .bind(&plan.school_year)
        .bind(plan.created_by)
        .bind(plan.status)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_plan(&self, id: Uuid) -> Result<Option<EventPlan>, AppError> {
        let plan = sqlx::query_as::<_, EventPlan>("SELECT * FROM event_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    async fn list_plans(&self, school_year: Option<&str>) -> Result<Vec<EventPlan>, AppError> {
        let plans = match school_year {
            Some(year) => {
                sqlx::query_as::<_, EventPlan>(
                    "SELECT * FROM event_plans WHERE school_year = $1 ORDER BY created_at DESC",
                )
                .bind(year)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EventPlan>(
                    "SELECT * FROM event_plans ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(plans)
    }

    async fn update_fields(&self, id: Uuid, patch: &PlanPatch) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE event_plans SET
                title           = COALESCE($2, title),
                description     = COALESCE($3, description),
                category        = COALESCE($4, category),
                event_date      = COALESCE($5, event_date),
                location        = COALESCE($6, location),
                budget_estimate = COALESCE($7, budget_estimate),
                school_year     = COALESCE($8, school_year),
                updated_at      = now()
            WHERE id = $1 AND status IN ('draft', 'pending_approval')
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.category)
        .bind(patch.event_date)
        .bind(&patch.location)
        .bind(patch.budget_estimate)
        .bind(&patch.school_year)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_status_if(
        &self,
        id: Uuid,
        from: PlanStatus,
        to: PlanStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE event_plans SET status = $3, updated_at = now() WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_members(&self, plan_id: Uuid) -> Result<Vec<PlanMember>, AppError> {
        let members = sqlx::query_as::<_, PlanMember>(
            "SELECT * FROM plan_members WHERE plan_id = $1 ORDER BY joined_at",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn get_member(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<PlanMember>, AppError> {
        let member = sqlx::query_as::<_, PlanMember>(
            "SELECT * FROM plan_members WHERE plan_id = $1 AND user_id = $2",
        )
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn insert_member(&self, member: &PlanMember) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO plan_members (plan_id, user_id, role, joined_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(member.plan_id)
        .bind(member.user_id)
        .bind(member.role)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_member(&self, plan_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM plan_members WHERE plan_id = $1 AND user_id = $2")
            .bind(plan_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn count_leads(&self, plan_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM plan_members WHERE plan_id = $1 AND role = 'lead'",
        )
        .bind(plan_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn insert_task(&self, task: &PlanTask) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO plan_tasks
                (id, plan_id, title, description, completed, assignee, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id)
        .bind(task.plan_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.assignee)
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_task(&self, plan_id: Uuid, task_id: Uuid) -> Result<Option<PlanTask>, AppError> {
        let task = sqlx::query_as::<_, PlanTask>(
            "SELECT * FROM plan_tasks WHERE plan_id = $1 AND id = $2",
        )
        .bind(plan_id)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn list_tasks(&self, plan_id: Uuid) -> Result<Vec<PlanTask>, AppError> {
        let tasks = sqlx::query_as::<_, PlanTask>(
            "SELECT * FROM plan_tasks WHERE plan_id = $1 ORDER BY created_at",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn set_task_completed(
        &self,
        plan_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE plan_tasks SET completed = $3, updated_at = now() WHERE plan_id = $1 AND id = $2",
        )
        .bind(plan_id)
        .bind(task_id)
        .bind(completed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_task_assignee(
        &self,
        plan_id: Uuid,
        task_id: Uuid,
        assignee: Option<Uuid>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE plan_tasks SET assignee = $3, updated_at = now() WHERE plan_id = $1 AND id = $2",
        )
        .bind(plan_id)
        .bind(task_id)
        .bind(assignee)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn begin_review(&self, plan_id: Uuid, from: PlanStatus) -> Result<bool, AppError> {
        // Flip and vote reset commit together; a failed flip leaves the
        // prior round's votes in place.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE event_plans SET status = $3, updated_at = now() WHERE id = $1 AND status = $2",
        )
        .bind(plan_id)
        .bind(from)
        .bind(PlanStatus::PendingApproval)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != 1 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM approval_votes WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn upsert_vote_and_list(
        &self,
        plan_id: Uuid,
        voter_id: Uuid,
        decision: VoteDecision,
    ) -> Result<(PlanStatus, Vec<ApprovalVote>), AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes voters on this plan: the second voter blocks
        // here until the first commits, so its snapshot below includes every
        // earlier vote. The locked re-read also catches a plan that was
        // decided after the caller's own status check.
        let status: PlanStatus =
            sqlx::query_scalar("SELECT status FROM event_plans WHERE id = $1 FOR UPDATE")
                .bind(plan_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("plan '{}' was not found", plan_id)))?;

        if status != PlanStatus::PendingApproval {
            return Ok((status, Vec::new()));
        }

        sqlx::query(
            r#"
            INSERT INTO approval_votes (plan_id, voter_id, decision, cast_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (plan_id, voter_id)
            DO UPDATE SET decision = EXCLUDED.decision, cast_at = EXCLUDED.cast_at
            "#,
        )
        .bind(plan_id)
        .bind(voter_id)
        .bind(decision)
        .execute(&mut *tx)
        .await?;

        let votes = sqlx::query_as::<_, ApprovalVote>(
            "SELECT * FROM approval_votes WHERE plan_id = $1 ORDER BY cast_at",
        )
        .bind(plan_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((PlanStatus::PendingApproval, votes))
    }

    async fn list_votes(&self, plan_id: Uuid) -> Result<Vec<ApprovalVote>, AppError> {
        let votes = sqlx::query_as::<_, ApprovalVote>(
            "SELECT * FROM approval_votes WHERE plan_id = $1 ORDER BY cast_at",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(votes)
    }

    async fn insert_resource(&self, resource: &PlanResource) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO plan_resources (id, plan_id, title, url, added_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(resource.id)
        .bind(resource.plan_id)
        .bind(&resource.title)
        .bind(&resource.url)
        .bind(resource.added_by)
        .bind(resource.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_resource(&self, plan_id: Uuid, resource_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM plan_resources WHERE plan_id = $1 AND id = $2")
            .bind(plan_id)
            .bind(resource_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_resources(&self, plan_id: Uuid) -> Result<Vec<PlanResource>, AppError> {
        let resources = sqlx::query_as::<_, PlanResource>(
            "SELECT * FROM plan_resources WHERE plan_id = $1 ORDER BY created_at",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(resources)
    }
}
