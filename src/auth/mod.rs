use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PlanRole;
use crate::utils::error::AppError;

/// Authorization collaborator. Identity itself lives outside this service;
/// the engine only asks these two questions.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Organization-wide board-officer standing.
    async fn is_board_member(&self, user_id: Uuid) -> Result<bool, AppError>;
    /// The user's role within one plan, if any.
    async fn plan_role(&self, user_id: Uuid, plan_id: Uuid) -> Result<Option<PlanRole>, AppError>;
}

#[derive(Clone)]
pub struct PgAuthorizer {
    pool: PgPool,
}

impl PgAuthorizer {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Authorizer for PgAuthorizer {
    async fn is_board_member(&self, user_id: Uuid) -> Result<bool, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM board_members WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn plan_role(&self, user_id: Uuid, plan_id: Uuid) -> Result<Option<PlanRole>, AppError> {
        let role: Option<PlanRole> = sqlx::query_scalar(
            "SELECT role FROM plan_members WHERE plan_id = $1 AND user_id = $2",
        )
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }
}
