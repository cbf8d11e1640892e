use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use tradebench_auth::capability::{issue_capability_token_at, verify_capability_token};
use tradebench_auth::share_link::{generate_share_token, hash_share_token, random_token_hex};
use tradebench_config::AuthConfig;
use tradebench_core::AppError;

use super::model::{Employee, EmployeeSummary};

/// Session TTL floor: a token about to expire still buys a minute of session.
const MIN_SESSION_SECS: i64 = 60;

/// Session TTL ceiling: one year, regardless of the token's remaining life.
const MAX_SESSION_SECS: i64 = 365 * 86_400;

/// Default capability-token lifetime in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 365;

/// A session minted from a capability token, plus what the cookie needs.
#[derive(Debug)]
pub struct CreatedSession {
    pub employee: EmployeeSummary,
    pub session_token: String,
    pub max_age_secs: i64,
    pub expires_at: DateTime<Utc>,
}

/// Clamp a session lifetime to `[60s, 365d]`.
///
/// The session never outlives the issuing token by more than the floor, and
/// never exceeds a year even for long-lived tokens.
pub fn clamp_session_ttl(remaining_secs: i64) -> i64 {
    remaining_secs.clamp(MIN_SESSION_SECS, MAX_SESSION_SECS)
}

pub struct EmployeeService;

impl EmployeeService {
    async fn get_employee(
        db: &PgPool,
        tenant_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<Employee>, AppError> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, tenant_id, name, employee_code, active,
                    share_token_hash, share_token_created_at, created_at, updated_at
             FROM employees
             WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(employee_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(tenant.id = %tenant_id, employee.id = %employee_id, error = %e, "Database error fetching employee");
            AppError::from(e)
        })
    }

    /// Load an employee or fail with the entity-state taxonomy:
    /// missing → 404, inactive → 403.
    async fn get_active_employee(
        db: &PgPool,
        tenant_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Employee, AppError> {
        let employee = Self::get_employee(db, tenant_id, employee_id)
            .await?
            .ok_or_else(|| {
                debug!(tenant.id = %tenant_id, employee.id = %employee_id, "Employee not found");
                AppError::not_found(anyhow::anyhow!("employee not found"))
            })?;

        if !employee.active {
            debug!(employee.id = %employee.id, "Employee is inactive");
            return Err(AppError::forbidden("employee inactive"));
        }

        Ok(employee)
    }

    /// Issue a capability token for an employee of the caller's tenant.
    ///
    /// The caller has already been authorized as a tenant admin; this only
    /// re-checks that the employee actually belongs to that tenant.
    #[instrument(skip(db, config), fields(tenant.id = %tenant_id, employee.id = %employee_id))]
    pub async fn issue_access_token(
        db: &PgPool,
        config: &AuthConfig,
        tenant_id: Uuid,
        employee_id: Uuid,
        ttl_days: i64,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let employee = Self::get_active_employee(db, tenant_id, employee_id).await?;

        let exp = Utc::now().timestamp() + ttl_days * 86_400;
        let token =
            issue_capability_token_at(employee.tenant_id, employee.id, exp, &config.employee_secret);

        info!(
            employee.id = %employee.id,
            ttl_days = %ttl_days,
            "Issued employee access token"
        );

        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AppError::internal_error("token expiry out of range"))?;
        Ok((token, expires_at))
    }

    /// Rotate the employee's share link. The stored digest is overwritten, so
    /// any previously issued link is invalid from here on.
    #[instrument(skip(db), fields(tenant.id = %tenant_id, employee.id = %employee_id))]
    pub async fn rotate_share_link(
        db: &PgPool,
        tenant_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let employee = Self::get_active_employee(db, tenant_id, employee_id).await?;

        let (token, digest) = generate_share_token();

        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "UPDATE employees
             SET share_token_hash = $1, share_token_created_at = NOW(), updated_at = NOW()
             WHERE id = $2
             RETURNING share_token_created_at",
        )
        .bind(&digest)
        .bind(employee.id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(employee.id = %employee.id, error = %e, "Database error rotating share link");
            AppError::from(e)
        })?;

        info!(employee.id = %employee.id, "Rotated employee share link");

        Ok((token, created_at))
    }

    /// Exchange a share-link token for a capability token.
    ///
    /// The link carries no expiry; it dies only when the digest is rotated.
    #[instrument(skip(db, config, raw_token))]
    pub async fn redeem_share_link(
        db: &PgPool,
        config: &AuthConfig,
        raw_token: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let digest = hash_share_token(raw_token);

        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, tenant_id, name, employee_code, active,
                    share_token_hash, share_token_created_at, created_at, updated_at
             FROM employees
             WHERE share_token_hash = $1",
        )
        .bind(&digest)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error resolving share link");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!("Share link matched no employee");
            AppError::unauthorized("invalid share link")
        })?;

        if !employee.active {
            warn!(employee.id = %employee.id, "Inactive employee redeemed share link");
            return Err(AppError::forbidden("employee inactive"));
        }

        let exp = Utc::now().timestamp() + DEFAULT_TOKEN_TTL_DAYS * 86_400;
        let token =
            issue_capability_token_at(employee.tenant_id, employee.id, exp, &config.employee_secret);

        info!(employee.id = %employee.id, "Share link redeemed");

        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AppError::internal_error("token expiry out of range"))?;
        Ok((token, expires_at))
    }

    /// Exchange a capability token for a persisted, revocable session.
    #[instrument(skip(db, config, raw_token))]
    pub async fn create_session(
        db: &PgPool,
        config: &AuthConfig,
        raw_token: &str,
    ) -> Result<CreatedSession, AppError> {
        let claims = verify_capability_token(raw_token, &config.employee_secret)
            .map_err(|e| AppError::unauthorized(e.to_string()))?;

        let employee =
            Self::get_active_employee(db, claims.tenant_id, claims.employee_id).await?;

        let session_token = random_token_hex();
        let now = Utc::now();
        let max_age_secs = clamp_session_ttl(claims.exp - now.timestamp());
        let expires_at = now + Duration::seconds(max_age_secs);

        sqlx::query(
            "INSERT INTO employee_sessions (session_token, tenant_id, employee_id, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&session_token)
        .bind(employee.tenant_id)
        .bind(employee.id)
        .bind(expires_at)
        .execute(db)
        .await
        .map_err(|e| {
            error!(employee.id = %employee.id, error = %e, "Database error creating session");
            AppError::from(e)
        })?;

        info!(
            employee.id = %employee.id,
            max_age_secs = %max_age_secs,
            "Employee session created"
        );

        Ok(CreatedSession {
            employee: EmployeeSummary::from(&employee),
            session_token,
            max_age_secs,
            expires_at,
        })
    }

    /// Presence poll: the employee behind a live session, if any.
    ///
    /// Expired rows are excluded here rather than swept; "no session" is a
    /// normal answer, never an error.
    #[instrument(skip(db, session_token))]
    pub async fn session_status(
        db: &PgPool,
        session_token: &str,
    ) -> Result<Option<EmployeeSummary>, AppError> {
        sqlx::query_as::<_, EmployeeSummary>(
            "SELECT e.id, e.name, e.employee_code
             FROM employee_sessions s
             INNER JOIN employees e ON e.id = s.employee_id
             WHERE s.session_token = $1 AND s.expires_at > NOW()",
        )
        .bind(session_token)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error reading session");
            AppError::from(e)
        })
    }

    /// Idempotent logout: deleting a session that does not exist is success.
    #[instrument(skip(db, session_token))]
    pub async fn delete_session(db: &PgPool, session_token: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employee_sessions WHERE session_token = $1")
            .bind(session_token)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting session");
                AppError::from(e)
            })?;

        if result.rows_affected() > 0 {
            info!("Employee session deleted");
        } else {
            debug!("Logout for a session that no longer exists");
        }

        Ok(())
    }
}
