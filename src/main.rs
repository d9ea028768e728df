use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use dragonhub_server::auth::PgAuthorizer;
use dragonhub_server::config::Config;
use dragonhub_server::handlers::AppState;
use dragonhub_server::notify::LogInvalidator;
use dragonhub_server::routes::create_routes;
use dragonhub_server::store::PgPlanStore;
use dragonhub_server::workflow::WorkflowEngine;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let engine = WorkflowEngine::new(
        Arc::new(PgPlanStore::new(pool.clone())),
        Arc::new(PgAuthorizer::new(pool)),
        Arc::new(LogInvalidator),
        config.workflow_policy(),
    );
    let state = AppState {
        engine: Arc::new(engine),
    };

    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
