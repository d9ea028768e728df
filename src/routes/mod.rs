use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    health_check, members, plans, resources, tasks, votes, AppState,
};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/plans", get(plans::list_plans).post(plans::create_plan))
        .route("/plans/:id", get(plans::get_plan).patch(plans::update_plan))
        .route("/plans/:id/submit", post(plans::submit_plan))
        .route("/plans/:id/complete", post(plans::complete_plan))
        .route("/plans/:id/votes", post(votes::cast_vote))
        .route("/plans/:id/members", post(members::add_member))
        .route(
            "/plans/:id/members/:user_id",
            delete(members::remove_member),
        )
        .route("/plans/:id/tasks", post(tasks::create_task))
        .route(
            "/plans/:id/tasks/:task_id/status",
            patch(tasks::toggle_task),
        )
        .route(
            "/plans/:id/tasks/:task_id/assignee",
            patch(tasks::assign_task),
        )
        .route("/plans/:id/resources", post(resources::add_resource))
        .route(
            "/plans/:id/resources/:resource_id",
            delete(resources::remove_resource),
        )
        .with_state(state)
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
}
