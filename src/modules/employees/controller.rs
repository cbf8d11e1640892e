use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use uuid::Uuid;
use validator::Validate;

use tradebench_core::AppError;

use crate::middleware::auth::TenantContext;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::utils::cookies::{clear_session_cookie, extract_cookie, session_cookie};

use super::model::{
    AccessTokenResponse, CreateSessionDto, IssueAccessTokenDto, MessageResponse,
    RedeemShareLinkDto, SessionCreatedResponse, SessionStatusResponse, ShareLinkResponse,
};
use super::service::{DEFAULT_TOKEN_TTL_DAYS, EmployeeService};

#[utoipa::path(
    post,
    path = "/api/employees/{id}/access-token",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = IssueAccessTokenDto,
    responses(
        (status = 200, description = "Capability token issued", body = AccessTokenResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Not a tenant admin, or employee inactive", body = ErrorResponse),
        (status = 404, description = "Employee not found in this tenant", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn issue_access_token(
    State(state): State<AppState>,
    context: TenantContext,
    Path(employee_id): Path<Uuid>,
    Json(dto): Json<IssueAccessTokenDto>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    context.require_admin()?;
    let tenant_id = context.tenant_id()?;

    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let ttl_days = dto.ttl_days.unwrap_or(DEFAULT_TOKEN_TTL_DAYS);
    let (token, expires_at) =
        EmployeeService::issue_access_token(&state.db, &state.auth_config, tenant_id, employee_id, ttl_days)
            .await?;

    Ok(Json(AccessTokenResponse { token, expires_at }))
}

#[utoipa::path(
    post,
    path = "/api/employees/{id}/share-link",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Share link rotated; previous links are now invalid", body = ShareLinkResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Not a tenant admin, or employee inactive", body = ErrorResponse),
        (status = 404, description = "Employee not found in this tenant", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn create_share_link(
    State(state): State<AppState>,
    context: TenantContext,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<ShareLinkResponse>, AppError> {
    context.require_admin()?;
    let tenant_id = context.tenant_id()?;

    let (token, created_at) =
        EmployeeService::rotate_share_link(&state.db, tenant_id, employee_id).await?;

    Ok(Json(ShareLinkResponse { token, created_at }))
}

#[utoipa::path(
    post,
    path = "/api/employee-session/redeem-link",
    request_body = RedeemShareLinkDto,
    responses(
        (status = 200, description = "Share link exchanged for a capability token", body = AccessTokenResponse),
        (status = 401, description = "Unknown or rotated share link", body = ErrorResponse),
        (status = 403, description = "Employee inactive", body = ErrorResponse)
    ),
    tag = "Employee Sessions"
)]
pub async fn redeem_share_link(
    State(state): State<AppState>,
    Json(dto): Json<RedeemShareLinkDto>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let (token, expires_at) =
        EmployeeService::redeem_share_link(&state.db, &state.auth_config, &dto.token).await?;

    Ok(Json(AccessTokenResponse { token, expires_at }))
}

#[utoipa::path(
    post,
    path = "/api/employee-session",
    request_body = CreateSessionDto,
    responses(
        (status = 201, description = "Session created; token set as an HttpOnly cookie", body = SessionCreatedResponse),
        (status = 401, description = "Capability token rejected, with the specific reason", body = ErrorResponse),
        (status = 403, description = "Employee inactive", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee Sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(dto): Json<CreateSessionDto>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<SessionCreatedResponse>), AppError>
{
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let created =
        EmployeeService::create_session(&state.db, &state.auth_config, &dto.token).await?;

    let cookie = session_cookie(
        &state.session_config,
        &created.session_token,
        created.max_age_secs,
    );

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SessionCreatedResponse {
            employee: created.employee,
            expires_at: created.expires_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/employee-session",
    responses(
        (status = 200, description = "Session presence; inactive is a normal answer", body = SessionStatusResponse)
    ),
    tag = "Employee Sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionStatusResponse>, AppError> {
    let Some(session_token) = extract_cookie(&headers, &state.session_config.cookie_name) else {
        return Ok(Json(SessionStatusResponse {
            active: false,
            employee: None,
        }));
    };

    let employee = EmployeeService::session_status(&state.db, &session_token).await?;

    Ok(Json(SessionStatusResponse {
        active: employee.is_some(),
        employee,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/employee-session",
    responses(
        (status = 200, description = "Logged out; cookie cleared whether or not a session existed", body = MessageResponse)
    ),
    tag = "Employee Sessions"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<MessageResponse>), AppError> {
    if let Some(session_token) = extract_cookie(&headers, &state.session_config.cookie_name) {
        EmployeeService::delete_session(&state.db, &session_token).await?;
    }

    // The cookie is cleared even when no row existed: logout is idempotent.
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(&state.session_config))],
        Json(MessageResponse {
            message: "logged out".to_string(),
        }),
    ))
}
