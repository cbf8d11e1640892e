//! App-mode authentication extractor.
//!
//! [`TenantContext`] runs the full membership resolution once per request:
//! bearer header → identity → deny/disable gates → tenant precedence. Every
//! app-mode handler takes it as an argument; the resolver's errors become the
//! HTTP response unchanged.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use tradebench_auth::identity::verify_identity_header;
use tradebench_core::AppError;

use crate::modules::auth::model::AuthorizationContext;
use crate::modules::auth::service::AuthorizationService;
use crate::state::AppState;

/// Preferred tenant hint when the caller holds multiple memberships.
pub const ACTIVE_TENANT_HEADER: &str = "x-active-tenant";

/// Legacy tenant hint; lower precedence than [`ACTIVE_TENANT_HEADER`].
pub const LEGACY_TENANT_HEADER: &str = "x-tenant-id";

/// Extractor that resolves the authenticated app user's tenant context.
#[derive(Debug, Clone)]
pub struct TenantContext(pub AuthorizationContext);

impl TenantContext {
    pub fn tenant_id(&self) -> Result<Uuid, AppError> {
        self.0.require_tenant()
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.0.require_admin()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.0.user_id
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.0.has_feature(feature)
    }
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let identity = verify_identity_header(bearer, &state.auth_config);

        let active_tenant = parse_tenant_header(&parts.headers, ACTIVE_TENANT_HEADER)?;
        let legacy_tenant = parse_tenant_header(&parts.headers, LEGACY_TENANT_HEADER)?;

        let context = AuthorizationService::resolve(
            &state.db,
            &state.auth_config,
            identity,
            active_tenant,
            legacy_tenant,
        )
        .await?;

        Ok(TenantContext(context))
    }
}

/// Parse an optional tenant-hint header.
///
/// A malformed UUID is a 400, not a silent fall-through — a typoed explicit
/// header must never land the caller in a different tenant.
fn parse_tenant_header(headers: &HeaderMap, name: &str) -> Result<Option<Uuid>, AppError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .map(Some)
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("invalid {} header", name)))
}
