//! Authorization models.
//!
//! The central type is [`AuthorizationContext`] — the complete, request-scoped
//! result of tenant resolution. It is built once per request and consumed
//! internally by handlers to scope queries and shape responses; it is never
//! serialized to the client as-is.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tradebench_core::AppError;

pub use tradebench_auth::Identity;

/// Role a user holds inside a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TenantRole {
    SuperAdmin,
    TenantAdmin,
    Manager,
    Staff,
}

impl TenantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantRole::SuperAdmin => "super_admin",
            TenantRole::TenantAdmin => "tenant_admin",
            TenantRole::Manager => "manager",
            TenantRole::Staff => "staff",
        }
    }

    /// Parse the snake_case form stored on membership rows.
    pub fn parse(role: &str) -> Result<TenantRole, AppError> {
        match role {
            "super_admin" => Ok(TenantRole::SuperAdmin),
            "tenant_admin" => Ok(TenantRole::TenantAdmin),
            "manager" => Ok(TenantRole::Manager),
            "staff" => Ok(TenantRole::Staff),
            _ => Err(AppError::internal_error(format!("Invalid role: {}", role))),
        }
    }
}

/// The line of business a tenant runs; shapes defaults elsewhere in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Retail,
    Wholesale,
    Services,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Retail => "retail",
            BusinessType::Wholesale => "wholesale",
            BusinessType::Services => "services",
        }
    }

    pub fn parse(value: &str) -> Result<BusinessType, AppError> {
        match value {
            "retail" => Ok(BusinessType::Retail),
            "wholesale" => Ok(BusinessType::Wholesale),
            "services" => Ok(BusinessType::Services),
            _ => Err(AppError::internal_error(format!(
                "Invalid business type: {}",
                value
            ))),
        }
    }
}

/// How the authorization context was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// A real membership row for the identity.
    Membership,
    /// Flag-gated legacy fallback for unauthenticated requests.
    Fallback,
    /// Super-admin without a tenant selected.
    SuperAdmin,
    /// Super-admin operating inside a tenant they hold no membership for.
    SuperAdminImpersonating,
}

/// Request-scoped authorization result.
///
/// Always complete: resolution either produces every field here or fails with
/// an error — never a partially populated context.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    /// Resolved app user; `None` only in legacy fallback mode.
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    /// `None` only in global super-admin mode.
    pub tenant_id: Option<Uuid>,
    pub role: TenantRole,
    pub business_type: Option<BusinessType>,
    /// Effective features: tenant features intersected with the member grant.
    pub features: Vec<String>,
    pub mode: AccessMode,
}

impl AuthorizationContext {
    /// The tenant this request is scoped to, or 403 when none is selected
    /// (global super-admin mode hitting a tenant-scoped endpoint).
    pub fn require_tenant(&self) -> Result<Uuid, AppError> {
        self.tenant_id
            .ok_or_else(|| AppError::forbidden("no tenant selected"))
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, TenantRole::SuperAdmin | TenantRole::TenantAdmin)
    }

    /// 403 unless the caller holds an admin role in the current tenant.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("administrator privileges required"))
        }
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Response for `GET /api/auth/me`, shaped from the caller's context.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub tenant_id: Option<Uuid>,
    pub role: TenantRole,
    pub business_type: Option<BusinessType>,
    pub features: Vec<String>,
    pub mode: AccessMode,
}

impl MeResponse {
    pub fn from_context(context: &AuthorizationContext) -> Self {
        Self {
            user_id: context.user_id,
            email: context.email.clone(),
            tenant_id: context.tenant_id,
            role: context.role,
            business_type: context.business_type,
            features: context.features.clone(),
            mode: context.mode,
        }
    }
}

/// Error body shape shared by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
