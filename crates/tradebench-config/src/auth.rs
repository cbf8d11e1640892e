//! Authentication configuration.
//!
//! All values are read once at startup. A missing token secret is a
//! deployment error and aborts the process immediately — it is identical for
//! every request and must never surface as a per-request 500.

use std::env;
use uuid::Uuid;

/// Secrets and access lists for the authentication core.
///
/// # Environment Variables
///
/// - `TRADEBENCH_IDENTITY_SECRET`: HS256 secret for app identity tokens (required)
/// - `TRADEBENCH_EMPLOYEE_SECRET`: HMAC secret for employee capability tokens (required)
/// - `TRADEBENCH_IDENTITY_EXPIRY`: identity token lifetime in seconds (default: 43200)
/// - `SUPER_ADMIN_EMAILS`: comma-separated allow-list for super-admin access
/// - `DENIED_EMAILS`: comma-separated hard deny-list, checked before any DB read
/// - `TRADEBENCH_LEGACY_FALLBACK_TENANT`: tenant UUID granted to unauthenticated
///   requests on unmigrated endpoints; unset disables the fallback entirely
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub identity_secret: String,
    pub employee_secret: String,
    pub identity_token_expiry: i64,
    pub super_admin_emails: Vec<String>,
    pub denied_emails: Vec<String>,
    pub legacy_fallback_tenant: Option<Uuid>,
}

impl AuthConfig {
    /// Load the auth configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if either token secret is absent. Secrets must be provisioned
    /// per deployment; there is no usable default.
    pub fn from_env() -> Self {
        let identity_secret = env::var("TRADEBENCH_IDENTITY_SECRET")
            .expect("TRADEBENCH_IDENTITY_SECRET must be set");
        let employee_secret = env::var("TRADEBENCH_EMPLOYEE_SECRET")
            .expect("TRADEBENCH_EMPLOYEE_SECRET must be set");

        Self {
            identity_secret,
            employee_secret,
            identity_token_expiry: env::var("TRADEBENCH_IDENTITY_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(43200), // 12 hours
            super_admin_emails: parse_email_list(env::var("SUPER_ADMIN_EMAILS").ok()),
            denied_emails: parse_email_list(env::var("DENIED_EMAILS").ok()),
            legacy_fallback_tenant: env::var("TRADEBENCH_LEGACY_FALLBACK_TENANT")
                .ok()
                .and_then(|s| Uuid::parse_str(s.trim()).ok()),
        }
    }

    /// Whether the email is on the super-admin allow-list (case-insensitive).
    pub fn is_super_admin(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.super_admin_emails.iter().any(|e| e == &email)
    }

    /// Whether the email is on the static deny-list (case-insensitive).
    pub fn is_denied(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.denied_emails.iter().any(|e| e == &email)
    }
}

fn parse_email_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
