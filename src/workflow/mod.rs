pub mod engine;

pub use engine::{
    NewPlan, NewTask, PlanDetail, WorkflowEngine, WorkflowPolicy, DEFAULT_APPROVAL_THRESHOLD,
};
