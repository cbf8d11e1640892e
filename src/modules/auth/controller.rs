use axum::Json;

use tradebench_core::AppError;

use crate::middleware::auth::TenantContext;

use super::model::{ErrorResponse, MeResponse};

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Resolved tenant, role and feature set for the caller", body = MeResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account disabled or no tenant access", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn get_me(context: TenantContext) -> Result<Json<MeResponse>, AppError> {
    Ok(Json(MeResponse::from_context(&context.0)))
}
