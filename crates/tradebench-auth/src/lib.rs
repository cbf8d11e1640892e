//! # Tradebench Auth
//!
//! Token families and signing primitives for the Tradebench API.
//!
//! Three credential families with deliberately different trust models, kept
//! as distinct types rather than one polymorphic verifier:
//!
//! - [`identity`]: the app identity JWT presented by back-office users.
//!   Verified only — issuance belongs to the external login service (a
//!   signing half is provided for it and for tests). Unrevocable until expiry.
//! - [`capability`]: the employee capability token — a stateless HMAC-signed
//!   grant of `(tenant_id, employee_id)` with an expiry. Unrevocable until
//!   expiry; no server-side lookup needed to verify.
//! - [`share_link`]: random opaque one-time-link tokens whose SHA-256 digest
//!   is stored on the employee row. No expiry; revoked by rotating the digest.
//!
//! [`codec`] holds the base64url and HMAC-SHA256 plumbing shared by the
//! signed families; all signature comparisons are constant-time.
//!
//! # Example
//!
//! ```ignore
//! use tradebench_auth::capability::{issue_capability_token, verify_capability_token};
//!
//! let token = issue_capability_token(tenant_id, employee_id, 365, &config.employee_secret);
//! let claims = verify_capability_token(&token, &config.employee_secret)?;
//! assert_eq!(claims.tenant_id, tenant_id);
//! ```

pub mod capability;
pub mod codec;
pub mod error;
pub mod identity;
pub mod share_link;

// Re-export commonly used types at crate root
pub use capability::CapabilityClaims;
pub use error::TokenError;
pub use identity::Identity;
