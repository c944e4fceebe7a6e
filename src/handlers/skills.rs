use crate::auth::Caller;
use crate::error::{ApiError, ValidatedJson};
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use model::access::Endpoint;
use model::entities::skill;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for adding a skill to the catalog
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateSkillRequest {
    /// Skill name, unique across the catalog
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

/// Catalog skill response model
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SkillResponse {
    pub id: i32,
    pub name: String,
}

impl From<skill::Model> for SkillResponse {
    fn from(model: skill::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Add a skill to the catalog (staff only)
#[utoipa::path(
    post,
    path = "/api/v1/skills/create",
    tag = "skills",
    request_body = CreateSkillRequest,
    responses(
        (status = 201, description = "Skill created successfully", body = ApiResponse<SkillResponse>),
        (status = 400, description = "Missing or invalid name", body = ErrorResponse),
        (status = 403, description = "Staff account required", body = ErrorResponse),
        (status = 409, description = "Skill already exists", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller, payload))]
pub async fn create_skill(
    State(state): State<AppState>,
    caller: Caller,
    payload: ValidatedJson<CreateSkillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SkillResponse>>), ApiError> {
    let account_model = caller.authorize(Endpoint::CreateSkill)?;
    let Valid(Json(request)) = payload?;
    debug!("Account ID {} is creating skill {:?}", account_model.id, request.name);

    let skill_model = skill::create_skill(&state.db, request.name.as_deref()).await?;

    info!("Skill created successfully with ID: {}, name: {}", skill_model.id, skill_model.name);
    let response = ApiResponse::success(SkillResponse::from(skill_model), "Skill created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// List the skill catalog in alphabetical order
#[utoipa::path(
    get,
    path = "/api/v1/skills/list",
    tag = "skills",
    responses(
        (status = 200, description = "Skills retrieved successfully", body = ApiResponse<Vec<SkillResponse>>),
        (status = 403, description = "Authentication required", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller))]
pub async fn list_skills(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<SkillResponse>>>, ApiError> {
    caller.authorize(Endpoint::ListSkills)?;

    let skills: Vec<SkillResponse> = skill::list_skills(&state.db)
        .await?
        .into_iter()
        .map(SkillResponse::from)
        .collect();

    debug!("Retrieved {} skills", skills.len());
    Ok(Json(ApiResponse::success(skills, "Skills retrieved successfully")))
}
