//! Employee capability tokens.
//!
//! A capability token is a stateless, HMAC-signed grant of
//! `(tenant_id, employee_id)` with an expiry:
//!
//! ```text
//! base64url(JSON{tenant_id, employee_id, exp}) "." base64url(HMAC-SHA256(secret, payload_b64))
//! ```
//!
//! Verification checks run in a fixed order so each malformed input maps to
//! exactly one [`TokenError`] variant: format, encoding, payload, signature,
//! expiry, then required fields. The payload is parsed as a raw JSON value
//! before the field check so a token missing a claim still fails on its
//! signature or expiry first when those are also wrong.
//!
//! Tokens are never persisted and cannot be revoked before `exp`; issue them
//! only after the caller has been authorized for the target employee.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec;
use crate::error::TokenError;

/// Claims carried by a verified capability token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityClaims {
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    /// Expiry as a Unix timestamp (seconds).
    pub exp: i64,
}

/// Issue a capability token valid for `ttl_days` from now.
pub fn issue_capability_token(
    tenant_id: Uuid,
    employee_id: Uuid,
    ttl_days: i64,
    secret: &str,
) -> String {
    let exp = Utc::now().timestamp() + ttl_days * 86_400;
    issue_capability_token_at(tenant_id, employee_id, exp, secret)
}

/// Issue a capability token with an explicit expiry timestamp.
pub fn issue_capability_token_at(
    tenant_id: Uuid,
    employee_id: Uuid,
    exp: i64,
    secret: &str,
) -> String {
    let payload = serde_json::json!({
        "tenant_id": tenant_id,
        "employee_id": employee_id,
        "exp": exp,
    });
    let payload_b64 = codec::encode_segment(payload.to_string().as_bytes());
    let signature = codec::sign(&payload_b64, secret.as_bytes());
    format!("{payload_b64}.{signature}")
}

/// Verify a capability token against the current wall clock.
pub fn verify_capability_token(token: &str, secret: &str) -> Result<CapabilityClaims, TokenError> {
    verify_capability_token_at(token, secret, Utc::now().timestamp())
}

/// Verify a capability token against an explicit `now` timestamp.
pub fn verify_capability_token_at(
    token: &str,
    secret: &str,
    now: i64,
) -> Result<CapabilityClaims, TokenError> {
    // 1. Exactly payload "." signature.
    let mut parts = token.split('.');
    let (payload_b64, signature_b64) = match (parts.next(), parts.next(), parts.next()) {
        (Some(payload), Some(signature), None) => (payload, signature),
        _ => return Err(TokenError::InvalidFormat),
    };

    // 2. Payload must be base64url.
    let payload_bytes = codec::decode_segment(payload_b64)?;

    // 3. Payload must be JSON.
    let payload: serde_json::Value =
        serde_json::from_slice(&payload_bytes).map_err(|_| TokenError::InvalidPayload)?;

    // 4. Signature over the encoded payload string, constant-time.
    codec::verify_signature(payload_b64, signature_b64, secret.as_bytes())?;

    // 5. Expiry must be an integer in the future.
    let exp = payload
        .get("exp")
        .and_then(|v| v.as_i64())
        .ok_or(TokenError::Expired)?;
    if exp <= now {
        return Err(TokenError::Expired);
    }

    // 6. Both subject claims must be present and valid UUIDs.
    let tenant_id = claim_uuid(&payload, "tenant_id")?;
    let employee_id = claim_uuid(&payload, "employee_id")?;

    Ok(CapabilityClaims {
        tenant_id,
        employee_id,
        exp,
    })
}

fn claim_uuid(payload: &serde_json::Value, key: &str) -> Result<Uuid, TokenError> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or(TokenError::MissingFields)
}
