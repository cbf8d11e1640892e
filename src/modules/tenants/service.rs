use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use tradebench_core::AppError;

use super::model::{MembershipSummary, Tenant};

pub struct TenantService;

impl TenantService {
    #[instrument(skip(db), fields(tenant.id = %tenant_id, db.operation = "SELECT", db.table = "tenants"))]
    pub async fn get_tenant(db: &PgPool, tenant_id: Uuid) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, business_type, features, created_at, updated_at
             FROM tenants WHERE id = $1",
        )
        .bind(tenant_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(tenant.id = %tenant_id, error = %e, "Database error fetching tenant");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(tenant.id = %tenant_id, "Tenant not found");
            AppError::not_found(anyhow::anyhow!("tenant not found"))
        })
    }

    /// The caller's memberships, oldest first — the same order the resolver
    /// uses to pick a default tenant.
    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "tenant_memberships"))]
    pub async fn list_memberships(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<MembershipSummary>, AppError> {
        let memberships = sqlx::query_as::<_, MembershipSummary>(
            "SELECT m.tenant_id, t.name, t.business_type, m.role
             FROM tenant_memberships m
             INNER JOIN tenants t ON t.id = m.tenant_id
             WHERE m.user_id = $1
             ORDER BY m.created_at ASC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(user.id = %user_id, error = %e, "Database error listing memberships");
            AppError::from(e)
        })?;

        debug!(
            user.id = %user_id,
            count = %memberships.len(),
            "Memberships listed"
        );

        Ok(memberships)
    }
}
