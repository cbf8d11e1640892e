//! Dual-mode request actor.
//!
//! Some endpoints serve both back-office app users and employees. The
//! [`Actor`] extractor picks the mode per request: a present
//! `X-Employee-Token` header is verified first and binds the request to
//! exactly that token's `(tenant_id, employee_id)` — any employee id supplied
//! in a request body is ignored by construction, so a token holder cannot act
//! as a different employee. Only when the header is absent does the request
//! fall through to app-mode tenant resolution.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use tradebench_auth::capability::verify_capability_token;
use tradebench_core::AppError;

use crate::middleware::auth::TenantContext;
use crate::state::AppState;

/// Capability-token header selecting employee mode.
pub const EMPLOYEE_TOKEN_HEADER: &str = "x-employee-token";

/// Employee identity proven by a capability token.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeActor {
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
}

/// The authenticated party behind a dual-mode request.
#[derive(Debug, Clone)]
pub enum Actor {
    Employee(EmployeeActor),
    User(TenantContext),
}

impl Actor {
    /// The tenant every query in this request must be scoped to.
    pub fn tenant_id(&self) -> Result<Uuid, AppError> {
        match self {
            Actor::Employee(employee) => Ok(employee.tenant_id),
            Actor::User(context) => context.tenant_id(),
        }
    }

    /// The employee the request is bound to, in employee mode.
    pub fn employee_id(&self) -> Option<Uuid> {
        match self {
            Actor::Employee(employee) => Some(employee.employee_id),
            Actor::User(_) => None,
        }
    }

    pub fn is_employee(&self) -> bool {
        matches!(self, Actor::Employee(_))
    }
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Token-first: the employee token wins even when a valid bearer
        // token is also present.
        let employee_token = parts
            .headers
            .get(EMPLOYEE_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty());

        if let Some(token) = employee_token {
            let claims = verify_capability_token(token, &state.auth_config.employee_secret)
                .map_err(|e| AppError::unauthorized(e.to_string()))?;

            return Ok(Actor::Employee(EmployeeActor {
                tenant_id: claims.tenant_id,
                employee_id: claims.employee_id,
            }));
        }

        TenantContext::from_request_parts(parts, state)
            .await
            .map(Actor::User)
    }
}
