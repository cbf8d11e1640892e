use axum::{Json, extract::State};

use tradebench_core::AppError;

use crate::middleware::actor::Actor;
use crate::middleware::auth::TenantContext;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;

use super::model::{MembershipSummary, WorkspaceResponse};
use super::service::TenantService;

#[utoipa::path(
    get,
    path = "/api/tenants",
    responses(
        (status = 200, description = "The caller's memberships, oldest first", body = [MembershipSummary]),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account disabled or no tenant access", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
pub async fn get_my_tenants(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<MembershipSummary>>, AppError> {
    let memberships = match context.user_id() {
        Some(user_id) => TenantService::list_memberships(&state.db, user_id).await?,
        // Legacy fallback mode carries no identity to list memberships for.
        None => vec![],
    };
    Ok(Json(memberships))
}

#[utoipa::path(
    get,
    path = "/api/workspace",
    responses(
        (status = 200, description = "Workspace summary for the current actor", body = WorkspaceResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 403, description = "No tenant selected", body = ErrorResponse),
        (status = 404, description = "Tenant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("employee_token" = [])),
    tag = "Tenants"
)]
pub async fn get_workspace(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<WorkspaceResponse>, AppError> {
    let tenant_id = actor.tenant_id()?;
    let tenant = TenantService::get_tenant(&state.db, tenant_id).await?;

    let (actor_kind, features) = match &actor {
        Actor::Employee(_) => ("employee".to_string(), tenant.features.clone()),
        Actor::User(context) => ("user".to_string(), context.0.features.clone()),
    };

    Ok(Json(WorkspaceResponse {
        tenant_id: tenant.id,
        tenant_name: tenant.name,
        business_type: tenant.business_type,
        actor_kind,
        employee_id: actor.employee_id(),
        features,
    }))
}
