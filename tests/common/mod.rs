#![allow(dead_code)]

use axum::Router;
use sqlx::PgPool;
use uuid::Uuid;

use tradebench::router::init_router;
use tradebench::state::AppState;
use tradebench_auth::identity::issue_identity_token;
use tradebench_config::{AuthConfig, CorsConfig, SessionConfig};

pub const SUPER_ADMIN_EMAIL: &str = "root@tradebench.io";
pub const DENIED_EMAIL: &str = "blocked@tradebench.io";

/// Deterministic test config; never read from the environment so parallel
/// tests cannot race on env vars.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        identity_secret: "identity-test-secret-at-least-32-chars".to_string(),
        employee_secret: "employee-test-secret".to_string(),
        identity_token_expiry: 3600,
        super_admin_emails: vec![SUPER_ADMIN_EMAIL.to_string()],
        denied_emails: vec![DENIED_EMAIL.to_string()],
        legacy_fallback_tenant: None,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_config(pool, test_auth_config())
}

pub fn setup_test_app_with_config(pool: PgPool, auth_config: AuthConfig) -> Router {
    let state = AppState {
        db: pool,
        auth_config,
        session_config: SessionConfig::default(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };
    init_router(state)
}

/// Bearer header value for a freshly signed identity token.
pub fn bearer_for(user_id: Uuid, email: &str) -> String {
    let token = issue_identity_token(user_id, email, &test_auth_config()).unwrap();
    format!("Bearer {token}")
}

pub async fn create_tenant(
    pool: &PgPool,
    name: &str,
    business_type: &str,
    features: &[&str],
) -> Uuid {
    let features: Vec<String> = features.iter().map(|f| f.to_string()).collect();
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO tenants (name, business_type, features) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(business_type)
    .bind(features)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_app_user(pool: &PgPool, user_id: Uuid, email: &str, is_disabled: bool) {
    sqlx::query("INSERT INTO app_users (id, email, is_disabled) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(email)
        .bind(is_disabled)
        .execute(pool)
        .await
        .unwrap();
}

/// Seed a membership. `created_days_ago` separates membership ages so the
/// oldest-membership fallback is deterministic; same-statement NOW() values
/// would tie.
pub async fn create_membership(
    pool: &PgPool,
    user_id: Uuid,
    tenant_id: Uuid,
    role: &str,
    features: Option<&[&str]>,
    created_days_ago: i64,
) {
    let features: Option<Vec<String>> =
        features.map(|f| f.iter().map(|s| s.to_string()).collect());
    sqlx::query(
        "INSERT INTO tenant_memberships (user_id, tenant_id, role, features, created_at)
         VALUES ($1, $2, $3, $4, NOW() - make_interval(days => $5::int))",
    )
    .bind(user_id)
    .bind(tenant_id)
    .bind(role)
    .bind(features)
    .bind(created_days_ago as i32)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_employee(
    pool: &PgPool,
    tenant_id: Uuid,
    name: &str,
    employee_code: &str,
    active: bool,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO employees (tenant_id, name, employee_code, active)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(tenant_id)
    .bind(name)
    .bind(employee_code)
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@tradebench.io", Uuid::new_v4())
}
