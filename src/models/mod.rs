pub mod member;
pub mod plan;
pub mod resource;
pub mod task;
pub mod vote;

pub use member::{PlanMember, PlanRole};
pub use plan::{EventPlan, PlanStatus};
pub use resource::PlanResource;
pub use task::PlanTask;
pub use vote::{ApprovalVote, VoteDecision};
