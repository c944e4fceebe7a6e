use crate::auth::Caller;
use crate::error::{ApiError, ValidatedJson};
use crate::photo::decode_photo;
use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use model::access::Endpoint;
use model::entities::{
    account::{self, AccountProfile},
    account_skill, auth_token, job, skill,
};
use model::ModelError;
use sea_orm::EntityTrait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Accepts E.164 numbers: `+` followed by 8 to 15 digits.
fn validate_cellphone(cellphone: &str) -> Result<(), ValidationError> {
    let digits = cellphone
        .strip_prefix('+')
        .ok_or_else(|| ValidationError::new("cellphone_prefix"))?;

    if !(8..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("cellphone_digits"));
    }

    Ok(())
}

/// Strips surrounding whitespace so padded input reaches validation clean.
fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Request body for registering an account
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateAccountRequest {
    /// Login email, unique case-insensitively
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    /// Plain-text password; never returned
    #[validate(length(min = 6, max = 128))]
    #[schema(write_only)]
    pub password: Option<String>,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    /// Phone number in E.164 format (e.g. "+5511999999999")
    #[validate(custom(
        function = "validate_cellphone",
        message = "cellphone must be in E.164 format"
    ))]
    pub cellphone: Option<String>,
    /// Base64 encoded image, optionally as a `data:` URI
    pub photo: Option<String>,
}

/// Account response model
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// First and last name joined by a space
    pub display_name: String,
    pub cellphone: Option<String>,
    /// Photo path relative to the media root
    pub photo: Option<String>,
    pub is_staff: bool,
}

impl From<account::Model> for AccountResponse {
    fn from(model: account::Model) -> Self {
        Self {
            display_name: model.display_name(),
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            cellphone: model.cellphone,
            photo: model.photo,
            is_staff: model.is_staff,
        }
    }
}

/// Request body for obtaining an authentication token
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TokenRequest {
    pub email: Option<String>,
    #[schema(write_only)]
    pub password: Option<String>,
}

/// Authentication token response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Send as `Authorization: Token <token>`
    pub token: String,
}

/// Request body for attaching a skill to the calling account
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddSkillRequest {
    pub skill_id: Option<i32>,
    pub proficiency: Option<i16>,
}

/// Skill attached to an account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AccountSkillResponse {
    pub id: i32,
    pub skill_id: i32,
    pub name: String,
    pub proficiency: i16,
}

impl From<(account_skill::Model, skill::Model)> for AccountSkillResponse {
    fn from((link, skill): (account_skill::Model, skill::Model)) -> Self {
        Self {
            id: link.id,
            skill_id: skill.id,
            name: skill.name,
            proficiency: link.proficiency,
        }
    }
}

/// Request body for recording a job experience
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct AddJobRequest {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub company: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// Required unless `present_day` is set
    pub end_date: Option<NaiveDate>,
    /// The job is still ongoing
    pub present_day: Option<bool>,
}

impl From<AddJobRequest> for job::NewJob {
    fn from(request: AddJobRequest) -> Self {
        Self {
            title: request.title.unwrap_or_default(),
            company: request.company,
            start_date: request.start_date,
            end_date: request.end_date,
            present_day: request.present_day.unwrap_or(false),
        }
    }
}

/// Job experience response model
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct JobResponse {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub present_day: bool,
}

impl From<job::Model> for JobResponse {
    fn from(model: job::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            company: model.company,
            start_date: model.start_date,
            end_date: model.end_date,
            present_day: model.present_day,
        }
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/create",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_account(
    State(state): State<AppState>,
    payload: ValidatedJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    trace!("Entering create_account function");
    let Valid(Json(request)) = payload?;
    debug!("Registering account for email: {:?}", request.email);

    let photo = match request.photo.as_deref().map(str::trim) {
        Some(payload) if !payload.is_empty() => Some(state.media.save(&decode_photo(payload)?).await?),
        _ => None,
    };

    let profile = AccountProfile {
        first_name: request.first_name.unwrap_or_default(),
        last_name: request.last_name.unwrap_or_default(),
        cellphone: request.cellphone,
        photo: photo.clone(),
    };

    let created = account::create_account(
        &state.db,
        request.email.as_deref(),
        request.password.as_deref(),
        profile,
    )
    .await;

    match created {
        Ok(account_model) => {
            info!("Account created successfully with ID: {}", account_model.id);
            let response = ApiResponse::success(
                AccountResponse::from(account_model),
                "Account created successfully",
            );
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            if let Some(path) = photo {
                debug!("Discarding photo {} of rejected account", path);
                state.media.remove(&path).await;
            }
            Err(e.into())
        }
    }
}

/// Exchange credentials for an authentication token
#[utoipa::path(
    post,
    path = "/api/v1/accounts/token",
    tag = "accounts",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Missing field or invalid credentials", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    trace!("Entering obtain_token function");
    let Json(request) = payload?;

    let email = request
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or(ModelError::MissingField("email"))?;
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(ModelError::MissingField("password"))?;

    let Some(account_model) = account::authenticate(&state.db, email, password).await? else {
        warn!("Rejected login attempt for email: {}", email);
        return Err(ApiError::InvalidCredentials);
    };

    let token = auth_token::issue(&state.db, &account_model).await?;
    let account_model = account_model.record_login(&state.db).await?;

    info!("Issued token for account ID: {}", account_model.id);
    let response = ApiResponse::success(TokenResponse { token: token.key }, "Token issued");
    Ok(Json(response))
}

/// Get the profile of the calling account
#[utoipa::path(
    get,
    path = "/api/v1/accounts/me",
    tag = "accounts",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 403, description = "Authentication required", body = ErrorResponse)
    )
)]
#[instrument(skip(caller))]
pub async fn get_me(caller: Caller) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account_model = caller.authorize(Endpoint::ReadOwnProfile)?;
    debug!("Returning profile of account ID: {}", account_model.id);

    Ok(Json(ApiResponse::success(
        AccountResponse::from(account_model),
        "Account retrieved successfully",
    )))
}

/// Attach a catalog skill to the calling account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/me/skills",
    tag = "accounts",
    request_body = AddSkillRequest,
    responses(
        (status = 201, description = "Skill attached", body = ApiResponse<AccountSkillResponse>),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 403, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Skill not found", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Skill already attached", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller, payload))]
pub async fn add_my_skill(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<AddSkillRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AccountSkillResponse>>), ApiError> {
    let account_model = caller.authorize(Endpoint::AddOwnSkill)?;
    let Json(request) = payload?;
    trace!("Entering add_my_skill for account ID: {}", account_model.id);

    let skill_id = request.skill_id.ok_or(ModelError::MissingField("skill"))?;
    let skill_model = skill::Entity::find_by_id(skill_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Skill {}", skill_id)))?;

    let link = account_model
        .add_skill(&state.db, Some(&skill_model), request.proficiency)
        .await?;

    info!("Attached skill {} to account ID: {}", skill_id, account_model.id);
    let response = ApiResponse::success(
        AccountSkillResponse::from((link, skill_model)),
        "Skill added successfully",
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// List the skills of the calling account, ordered by skill name
#[utoipa::path(
    get,
    path = "/api/v1/accounts/me/skills",
    tag = "accounts",
    responses(
        (status = 200, description = "Skills retrieved successfully", body = ApiResponse<Vec<AccountSkillResponse>>),
        (status = 403, description = "Authentication required", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller))]
pub async fn list_my_skills(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<AccountSkillResponse>>>, ApiError> {
    let account_model = caller.authorize(Endpoint::ReadOwnProfile)?;

    let skills: Vec<AccountSkillResponse> = account_model
        .skills(&state.db)
        .await?
        .into_iter()
        .map(AccountSkillResponse::from)
        .collect();

    debug!("Retrieved {} skills for account ID: {}", skills.len(), account_model.id);
    Ok(Json(ApiResponse::success(skills, "Skills retrieved successfully")))
}

/// Record a job experience for the calling account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/me/jobs",
    tag = "accounts",
    request_body = AddJobRequest,
    responses(
        (status = 201, description = "Job recorded", body = ApiResponse<JobResponse>),
        (status = 400, description = "Missing field or end date before start date", body = ErrorResponse),
        (status = 403, description = "Authentication required", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller, payload))]
pub async fn add_my_job(
    State(state): State<AppState>,
    caller: Caller,
    payload: ValidatedJson<AddJobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobResponse>>), ApiError> {
    let account_model = caller.authorize(Endpoint::AddOwnJob)?;
    let Valid(Json(request)) = payload?;
    trace!("Entering add_my_job for account ID: {}", account_model.id);

    let job_model = account_model.add_job(&state.db, request.into()).await?;

    info!("Recorded job {} for account ID: {}", job_model.id, account_model.id);
    let response = ApiResponse::success(JobResponse::from(job_model), "Job added successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// List the jobs of the calling account, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/accounts/me/jobs",
    tag = "accounts",
    responses(
        (status = 200, description = "Jobs retrieved successfully", body = ApiResponse<Vec<JobResponse>>),
        (status = 403, description = "Authentication required", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller))]
pub async fn list_my_jobs(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, ApiError> {
    let account_model = caller.authorize(Endpoint::ReadOwnProfile)?;

    let jobs: Vec<JobResponse> = account_model
        .jobs(&state.db)
        .await?
        .into_iter()
        .map(JobResponse::from)
        .collect();

    debug!("Retrieved {} jobs for account ID: {}", jobs.len(), account_model.id);
    Ok(Json(ApiResponse::success(jobs, "Jobs retrieved successfully")))
}
