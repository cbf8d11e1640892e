use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A tenant — an isolated customer organization. All business data
/// partitions by tenant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub business_type: String,
    pub features: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// One row of the caller's tenant-switcher list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MembershipSummary {
    pub tenant_id: Uuid,
    pub name: String,
    pub business_type: String,
    pub role: String,
}

/// Dual-mode workspace summary: what the current actor sees of the tenant.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspaceResponse {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub business_type: String,
    /// "employee" or "user"
    pub actor_kind: String,
    /// Set only in employee mode; always the token's employee, never a
    /// client-supplied id.
    pub employee_id: Option<Uuid>,
    pub features: Vec<String>,
}
