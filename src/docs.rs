use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    AccessMode, BusinessType, ErrorResponse, MeResponse, TenantRole,
};
use crate::modules::employees::model::{
    AccessTokenResponse, CreateSessionDto, EmployeeSummary, IssueAccessTokenDto, MessageResponse,
    RedeemShareLinkDto, SessionCreatedResponse, SessionStatusResponse, ShareLinkResponse,
};
use crate::modules::tenants::model::{MembershipSummary, Tenant, WorkspaceResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::get_me,
        crate::modules::tenants::controller::get_my_tenants,
        crate::modules::tenants::controller::get_workspace,
        crate::modules::employees::controller::issue_access_token,
        crate::modules::employees::controller::create_share_link,
        crate::modules::employees::controller::redeem_share_link,
        crate::modules::employees::controller::create_session,
        crate::modules::employees::controller::get_session,
        crate::modules::employees::controller::delete_session,
    ),
    components(
        schemas(
            MeResponse,
            TenantRole,
            BusinessType,
            AccessMode,
            ErrorResponse,
            Tenant,
            MembershipSummary,
            WorkspaceResponse,
            EmployeeSummary,
            IssueAccessTokenDto,
            AccessTokenResponse,
            ShareLinkResponse,
            RedeemShareLinkDto,
            CreateSessionDto,
            SessionCreatedResponse,
            SessionStatusResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Tenant resolution for app users"),
        (name = "Tenants", description = "Tenant memberships and workspace"),
        (name = "Employees", description = "Employee credential management"),
        (name = "Employee Sessions", description = "Employee session lifecycle")
    ),
    info(
        title = "Tradebench API",
        version = "0.1.0",
        description = "Multi-tenant back-office API built with Rust, Axum, and PostgreSQL. This surface covers authentication, tenant resolution, and employee access.",
        contact(
            name = "API Support",
            email = "support@tradebench.io"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "employee_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Employee-Token"))),
            );
        }
    }
}
