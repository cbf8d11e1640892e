//! Employee session cookie configuration.

use std::env;

/// SameSite attribute for the employee session cookie.
///
/// Kept as explicit named variants because the right choice is
/// deployment-dependent: `None` for cross-site POST-then-GET flows such as
/// installed-app shells, `Lax` for ordinary top-level navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSitePolicy {
    Lax,
    None,
}

impl SameSitePolicy {
    /// The attribute value as it appears in the Set-Cookie header.
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSitePolicy::Lax => "Lax",
            SameSitePolicy::None => "None",
        }
    }
}

/// Employee session cookie settings.
///
/// # Environment Variables
///
/// - `EMPLOYEE_COOKIE_NAME`: cookie name (default: `employee_session`)
/// - `EMPLOYEE_COOKIE_SAMESITE`: `lax` or `none` (default: `lax`)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub same_site: SameSitePolicy,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let same_site = match env::var("EMPLOYEE_COOKIE_SAMESITE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "none" => SameSitePolicy::None,
            _ => SameSitePolicy::Lax,
        };

        Self {
            cookie_name: env::var("EMPLOYEE_COOKIE_NAME")
                .unwrap_or_else(|_| "employee_session".to_string()),
            same_site,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "employee_session".to_string(),
            same_site: SameSitePolicy::Lax,
        }
    }
}
