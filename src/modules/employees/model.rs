//! Employee data models and DTOs.
//!
//! Employees are tenant-scoped workers without an app account or password.
//! They authenticate through two credential families kept deliberately
//! distinct:
//!
//! - a signed capability token (stateless, unrevocable until expiry)
//! - a share-link token (opaque, revocable by rotating the stored digest)
//!
//! and hold short-lived cookie sessions minted from a capability token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Employee row. Never serialized directly — the share-token digest must not
/// leave the database layer.
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub employee_code: String,
    pub active: bool,
    pub share_token_hash: Option<String>,
    pub share_token_created_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The employee fields that are safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub name: String,
    pub employee_code: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            employee_code: employee.employee_code.clone(),
        }
    }
}

/// Persisted employee session, created on capability-token redemption and
/// deleted on logout. Expired rows linger until external housekeeping; reads
/// exclude them via `expires_at > now()`.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeSession {
    pub session_token: String,
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request body for issuing a capability token.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IssueAccessTokenDto {
    /// Token lifetime in days; defaults to 365.
    #[validate(range(min = 1, max = 365))]
    pub ttl_days: Option<i64>,
}

/// A freshly issued capability token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// A freshly rotated share-link token. The previous link is dead the moment
/// this response is produced.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShareLinkResponse {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for redeeming a share-link token.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RedeemShareLinkDto {
    #[validate(length(min = 1))]
    pub token: String,
}

/// Request body for creating an employee session from a capability token.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSessionDto {
    #[validate(length(min = 1))]
    pub token: String,
}

/// Response for a successfully created session. The session token itself
/// travels only in the Set-Cookie header.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionCreatedResponse {
    pub employee: EmployeeSummary,
    pub expires_at: DateTime<Utc>,
}

/// Presence-poll response; `active: false` is a normal answer, not an error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusResponse {
    pub active: bool,
    pub employee: Option<EmployeeSummary>,
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
