use crate::handlers::{
    accounts::{
        add_my_job, add_my_skill, create_account, get_me, list_my_jobs, list_my_skills,
        obtain_token,
    },
    health::health_check,
    skills::{create_skill, list_skills},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Registration and login
        .route("/api/v1/accounts/create", post(create_account))
        .route("/api/v1/accounts/token", post(obtain_token))
        // Own profile
        .route("/api/v1/accounts/me", get(get_me))
        .route("/api/v1/accounts/me/skills", post(add_my_skill))
        .route("/api/v1/accounts/me/skills", get(list_my_skills))
        .route("/api/v1/accounts/me/jobs", post(add_my_job))
        .route("/api/v1/accounts/me/jobs", get(list_my_jobs))
        // Skill catalog
        .route("/api/v1/skills/create", post(create_skill))
        .route("/api/v1/skills/list", get(list_skills))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
