use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::accounts::{
    AccountResponse, AccountSkillResponse, AddJobRequest, AddSkillRequest, CreateAccountRequest,
    JobResponse, TokenRequest, TokenResponse,
};
use crate::handlers::skills::{CreateSkillRequest, SkillResponse};
use crate::photo::MediaStorage;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Storage for uploaded profile photos
    pub media: MediaStorage,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Media root status
    pub media: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::obtain_token,
        crate::handlers::accounts::get_me,
        crate::handlers::accounts::add_my_skill,
        crate::handlers::accounts::list_my_skills,
        crate::handlers::accounts::add_my_job,
        crate::handlers::accounts::list_my_jobs,
        crate::handlers::skills::create_skill,
        crate::handlers::skills::list_skills,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CreateAccountRequest,
            AccountResponse,
            TokenRequest,
            TokenResponse,
            AddSkillRequest,
            AccountSkillResponse,
            AddJobRequest,
            JobResponse,
            CreateSkillRequest,
            SkillResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Account registration, login and profile endpoints"),
        (name = "skills", description = "Skill catalog endpoints"),
    ),
    info(
        title = "Skillfolio API",
        description = "Professional profile API. Authenticated endpoints expect an `Authorization: Token <key>` header obtained from `/api/v1/accounts/token`.",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
