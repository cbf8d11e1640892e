//! Employee session cookie handling.
//!
//! The session cookie is always HttpOnly + Secure with Path=/; the SameSite
//! attribute comes from [`SessionConfig`] because the right value depends on
//! how the employee surface is embedded (see [`SameSitePolicy`]).

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use tradebench_config::SessionConfig;

/// Build the Set-Cookie value for a new employee session.
pub fn session_cookie(config: &SessionConfig, session_token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; Secure; SameSite={}",
        config.cookie_name,
        session_token,
        max_age_secs,
        config.same_site.as_str()
    )
}

/// Build the Set-Cookie value that clears the session cookie.
///
/// Sent on every logout, whether or not a session row existed.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite={}",
        config.cookie_name,
        config.same_site.as_str()
    )
}

/// Extract a cookie value from the Cookie header, if present.
pub fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            if name == cookie_name {
                Some(value.to_string())
            } else {
                None
            }
        })
}
