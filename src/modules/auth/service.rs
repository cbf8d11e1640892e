//! Tenant membership resolution — the core state machine.
//!
//! Runs once per request. The hard gates (deny-list, `is_disabled`) come
//! first and cannot be bypassed by any later branch; after them the
//! precedence strategies run in a fixed order, first match wins:
//!
//! 1. explicit `X-Active-Tenant` header
//! 2. legacy `X-Tenant-Id` header
//! 3. oldest membership (by membership creation time)
//! 4. super-admin (impersonation when a header named a tenant, global otherwise)
//!
//! Each strategy is a separate function so it can be tested on its own and
//! new precedence rules are one function plus one call site.

use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use tradebench_config::AuthConfig;
use tradebench_core::{AppError, features};

use super::model::{AccessMode, AuthorizationContext, BusinessType, Identity, TenantRole};

/// Membership row joined with its tenant.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    role: String,
    member_features: Option<Vec<String>>,
    tenant_id: Uuid,
    business_type: String,
    tenant_features: Vec<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct TenantRow {
    id: Uuid,
    business_type: String,
    features: Vec<String>,
}

pub struct AuthorizationService;

impl AuthorizationService {
    /// Resolve the caller into a complete [`AuthorizationContext`].
    ///
    /// Side effects: one idempotent `app_users` upsert and one or two read
    /// joins. No transaction — no multi-row write ever happens here.
    #[instrument(skip(db, config, identity), fields(
        authenticated = identity.is_some(),
        active_tenant = ?active_tenant,
        legacy_tenant = ?legacy_tenant,
    ))]
    pub async fn resolve(
        db: &PgPool,
        config: &AuthConfig,
        identity: Option<Identity>,
        active_tenant: Option<Uuid>,
        legacy_tenant: Option<Uuid>,
    ) -> Result<AuthorizationContext, AppError> {
        let Some(identity) = identity else {
            return Self::resolve_legacy_fallback(db, config).await;
        };

        // Deny-listed addresses are refused before any DB round-trip.
        if config.is_denied(&identity.email) {
            warn!(user.id = %identity.user_id, "Denied email attempted access");
            return Err(AppError::forbidden("account disabled"));
        }

        let is_disabled = Self::upsert_app_user(db, &identity).await?;
        if is_disabled {
            // Unconditional hard block; nothing below may run once disabled.
            warn!(user.id = %identity.user_id, "Disabled account attempted access");
            return Err(AppError::forbidden("account disabled"));
        }

        // Explicit header beats the legacy header beats everything else.
        if let Some(tenant_id) = active_tenant.or(legacy_tenant) {
            if let Some(context) = Self::try_membership(db, &identity, tenant_id).await? {
                return Ok(context);
            }
            if let Some(context) =
                Self::try_impersonation(db, config, &identity, tenant_id).await?
            {
                return Ok(context);
            }
            return Err(AppError::forbidden("not authorized for this tenant"));
        }

        if let Some(context) = Self::try_default_membership(db, &identity).await? {
            return Ok(context);
        }
        if let Some(context) = Self::try_global_super_admin(config, &identity) {
            return Ok(context);
        }

        Err(AppError::forbidden("no tenant access"))
    }

    /// Idempotently ensure the app user row exists and read its disabled flag.
    ///
    /// The email is only written when previously absent, so an admin-edited
    /// address never gets clobbered by a stale token.
    async fn upsert_app_user(db: &PgPool, identity: &Identity) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "INSERT INTO app_users (id, email) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE
                SET email = COALESCE(app_users.email, EXCLUDED.email),
                    updated_at = NOW()
             RETURNING is_disabled",
        )
        .bind(identity.user_id)
        .bind(&identity.email)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(user.id = %identity.user_id, error = %e, "Database error upserting app user");
            AppError::from(e)
        })
    }

    /// Strategy: a membership row for the requested tenant.
    async fn try_membership(
        db: &PgPool,
        identity: &Identity,
        tenant_id: Uuid,
    ) -> Result<Option<AuthorizationContext>, AppError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT m.role, m.features AS member_features,
                    t.id AS tenant_id, t.business_type, t.features AS tenant_features
             FROM tenant_memberships m
             INNER JOIN tenants t ON t.id = m.tenant_id
             WHERE m.user_id = $1 AND m.tenant_id = $2",
        )
        .bind(identity.user_id)
        .bind(tenant_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(user.id = %identity.user_id, tenant.id = %tenant_id, error = %e, "Database error reading membership");
            AppError::from(e)
        })?;

        row.map(|row| Self::context_from_membership(identity, row))
            .transpose()
    }

    /// Strategy: the identity's oldest membership when no tenant was named.
    async fn try_default_membership(
        db: &PgPool,
        identity: &Identity,
    ) -> Result<Option<AuthorizationContext>, AppError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT m.role, m.features AS member_features,
                    t.id AS tenant_id, t.business_type, t.features AS tenant_features
             FROM tenant_memberships m
             INNER JOIN tenants t ON t.id = m.tenant_id
             WHERE m.user_id = $1
             ORDER BY m.created_at ASC
             LIMIT 1",
        )
        .bind(identity.user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(user.id = %identity.user_id, error = %e, "Database error reading default membership");
            AppError::from(e)
        })?;

        row.map(|row| Self::context_from_membership(identity, row))
            .transpose()
    }

    /// Strategy: super-admin entering a tenant they hold no membership for.
    ///
    /// The tenant is loaded directly; a nonexistent id is a 404, not a
    /// fall-through to another branch.
    async fn try_impersonation(
        db: &PgPool,
        config: &AuthConfig,
        identity: &Identity,
        tenant_id: Uuid,
    ) -> Result<Option<AuthorizationContext>, AppError> {
        if !config.is_super_admin(&identity.email) {
            return Ok(None);
        }

        let tenant = sqlx::query_as::<_, TenantRow>(
            "SELECT id, business_type, features FROM tenants WHERE id = $1",
        )
        .bind(tenant_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(tenant.id = %tenant_id, error = %e, "Database error loading tenant");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("tenant not found")))?;

        info!(
            user.id = %identity.user_id,
            tenant.id = %tenant.id,
            "Super-admin impersonating tenant"
        );

        Ok(Some(AuthorizationContext {
            user_id: Some(identity.user_id),
            email: Some(identity.email.clone()),
            tenant_id: Some(tenant.id),
            role: TenantRole::SuperAdmin,
            business_type: Some(BusinessType::parse(&tenant.business_type)?),
            // No member grant to intersect with: the full tenant set.
            features: features::effective_features(&tenant.features, None),
            mode: AccessMode::SuperAdminImpersonating,
        }))
    }

    /// Strategy: super-admin with no memberships and no tenant named.
    fn try_global_super_admin(
        config: &AuthConfig,
        identity: &Identity,
    ) -> Option<AuthorizationContext> {
        if !config.is_super_admin(&identity.email) {
            return None;
        }

        Some(AuthorizationContext {
            user_id: Some(identity.user_id),
            email: Some(identity.email.clone()),
            tenant_id: None,
            role: TenantRole::SuperAdmin,
            business_type: None,
            features: vec![],
            mode: AccessMode::SuperAdmin,
        })
    }

    /// Flag-gated legacy mode for unauthenticated requests against
    /// unmigrated endpoints. Off unless a fallback tenant is configured;
    /// every grant is logged at WARN because this path predates per-request
    /// identity and should be retired.
    async fn resolve_legacy_fallback(
        db: &PgPool,
        config: &AuthConfig,
    ) -> Result<AuthorizationContext, AppError> {
        let Some(tenant_id) = config.legacy_fallback_tenant else {
            return Err(AppError::unauthorized("missing credentials"));
        };

        let tenant = sqlx::query_as::<_, TenantRow>(
            "SELECT id, business_type, features FROM tenants WHERE id = $1",
        )
        .bind(tenant_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(tenant.id = %tenant_id, error = %e, "Database error loading fallback tenant");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            error!(tenant.id = %tenant_id, "Configured legacy fallback tenant does not exist");
            AppError::internal_error("legacy fallback tenant misconfigured")
        })?;

        warn!(
            tenant.id = %tenant.id,
            "Granting legacy fallback access to an unauthenticated request"
        );

        Ok(AuthorizationContext {
            user_id: None,
            email: None,
            tenant_id: Some(tenant.id),
            role: TenantRole::TenantAdmin,
            business_type: Some(BusinessType::parse(&tenant.business_type)?),
            features: features::effective_features(&tenant.features, None),
            mode: AccessMode::Fallback,
        })
    }

    fn context_from_membership(
        identity: &Identity,
        row: MembershipRow,
    ) -> Result<AuthorizationContext, AppError> {
        Ok(AuthorizationContext {
            user_id: Some(identity.user_id),
            email: Some(identity.email.clone()),
            tenant_id: Some(row.tenant_id),
            role: TenantRole::parse(&row.role)?,
            business_type: Some(BusinessType::parse(&row.business_type)?),
            features: features::effective_features(
                &row.tenant_features,
                row.member_features.as_deref(),
            ),
            mode: AccessMode::Membership,
        })
    }
}
