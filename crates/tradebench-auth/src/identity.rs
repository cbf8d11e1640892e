//! App identity tokens.
//!
//! The identity JWT is minted by the external login service after credential
//! verification; this core only verifies it. Verification never errors — any
//! failure is logged and yields `None`, and the caller decides what an
//! anonymous request means (usually a 401, or the flag-gated legacy
//! fallback).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use tradebench_config::AuthConfig;
use tradebench_core::AppError;

/// JWT claims for app identity tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// A verified app identity. Ephemeral — never persisted by this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

/// Sign an identity token.
///
/// Used by the external login service and by tests; request handling in this
/// core only ever verifies.
pub fn issue_identity_token(
    user_id: Uuid,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + config.identity_token_expiry as usize;

    let claims = IdentityClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.identity_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create identity token: {}", e)))
}

/// Verify the `Authorization` header value and extract the identity.
///
/// Accepts `Bearer <token>` or a raw token. Returns `None` on any failure —
/// absent header, bad signature, expiry, malformed subject — after logging
/// the reason at debug.
pub fn verify_identity_header(header: Option<&str>, config: &AuthConfig) -> Option<Identity> {
    let raw = header?.trim();
    if raw.is_empty() {
        return None;
    }
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

    let claims = match decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(config.identity_secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            debug!(error = %e, "Rejected identity token");
            return None;
        }
    };

    match Uuid::parse_str(&claims.sub) {
        Ok(user_id) => Some(Identity {
            user_id,
            email: claims.email,
        }),
        Err(_) => {
            debug!(sub = %claims.sub, "Identity token subject is not a UUID");
            None
        }
    }
}
