mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{
    DENIED_EMAIL, SUPER_ADMIN_EMAIL, bearer_for, create_app_user, create_membership,
    create_tenant, generate_unique_email, setup_test_app, setup_test_app_with_config,
    test_auth_config,
};

async fn get_me(app: axum::Router, headers: &[(&str, String)]) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri("/api/auth/me");
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_without_credentials_is_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_with_membership(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Acme Retail", "retail", &["orders", "inventory"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_id, "manager", None, 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"], tenant_id.to_string());
    assert_eq!(body["role"], "manager");
    assert_eq!(body["mode"], "membership");
    assert_eq!(body["business_type"], "retail");
    assert_eq!(
        body["features"],
        serde_json::json!(["orders", "inventory"])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_features_intersect_tenant_features(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Acme", "retail", &["orders", "inventory"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_id, "staff", Some(&["orders"]), 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], serde_json::json!(["orders"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_grant_outside_tenant_features_is_empty(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Acme", "retail", &["orders", "inventory"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_id, "staff", Some(&["reports"]), 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], serde_json::json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_disabled_account_is_blocked_despite_membership(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Acme", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, true).await;
    create_membership(&pool, user_id, tenant_id, "tenant_admin", None, 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "account disabled");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_disabled_super_admin_is_blocked(pool: PgPool) {
    let user_id = Uuid::new_v4();
    create_app_user(&pool, user_id, SUPER_ADMIN_EMAIL, true).await;

    let app = setup_test_app(pool);
    let (status, body) =
        get_me(app, &[("authorization", bearer_for(user_id, SUPER_ADMIN_EMAIL))]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "account disabled");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_denied_email_is_blocked_without_db_write(pool: PgPool) {
    let user_id = Uuid::new_v4();

    let app = setup_test_app(pool.clone());
    let (status, body) =
        get_me(app, &[("authorization", bearer_for(user_id, DENIED_EMAIL))]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "account disabled");

    // The deny-list check precedes the upsert: no row may appear.
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_active_tenant_header_beats_default_membership(pool: PgPool) {
    let tenant_a = create_tenant(&pool, "Older", "retail", &["orders"]).await;
    let tenant_b = create_tenant(&pool, "Newer", "wholesale", &["costs"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_a, "tenant_admin", None, 10).await;
    create_membership(&pool, user_id, tenant_b, "staff", None, 1).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, &email)),
            ("x-active-tenant", tenant_b.to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"], tenant_b.to_string());
    assert_eq!(body["role"], "staff");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_active_tenant_header_beats_legacy_header(pool: PgPool) {
    let tenant_a = create_tenant(&pool, "A", "retail", &["orders"]).await;
    let tenant_b = create_tenant(&pool, "B", "services", &["reports"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_a, "staff", None, 0).await;
    create_membership(&pool, user_id, tenant_b, "staff", None, 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, &email)),
            ("x-active-tenant", tenant_a.to_string()),
            ("x-tenant-id", tenant_b.to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"], tenant_a.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_legacy_header_is_honored_alone(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Legacy", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_id, "staff", None, 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, &email)),
            ("x-tenant-id", tenant_id.to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"], tenant_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_header_for_foreign_tenant_is_rejected(pool: PgPool) {
    let tenant_a = create_tenant(&pool, "Mine", "retail", &["orders"]).await;
    let tenant_b = create_tenant(&pool, "Theirs", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_a, "tenant_admin", None, 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, &email)),
            ("x-active-tenant", tenant_b.to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not authorized for this tenant");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_oldest_membership_is_the_default(pool: PgPool) {
    let tenant_old = create_tenant(&pool, "First", "retail", &["orders"]).await;
    let tenant_new = create_tenant(&pool, "Second", "wholesale", &["costs"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_new, "tenant_admin", None, 2).await;
    create_membership(&pool, user_id, tenant_old, "staff", None, 30).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"], tenant_old.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_tenant_header_is_bad_request(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();

    let app = setup_test_app(pool);
    let (status, _body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, &email)),
            ("x-active-tenant", "not-a-uuid".to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_impersonates_with_header(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Target", "wholesale", &["orders", "costs"]).await;
    let user_id = Uuid::new_v4();

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, SUPER_ADMIN_EMAIL)),
            ("x-active-tenant", tenant_id.to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "super_admin_impersonating");
    assert_eq!(body["tenant_id"], tenant_id.to_string());
    assert_eq!(body["role"], "super_admin");
    assert_eq!(body["features"], serde_json::json!(["orders", "costs"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_global_mode_without_header(pool: PgPool) {
    let user_id = Uuid::new_v4();

    let app = setup_test_app(pool);
    let (status, body) =
        get_me(app, &[("authorization", bearer_for(user_id, SUPER_ADMIN_EMAIL))]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "super_admin");
    assert_eq!(body["tenant_id"], serde_json::Value::Null);
    assert_eq!(body["features"], serde_json::json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_unknown_tenant_is_not_found(pool: PgPool) {
    let user_id = Uuid::new_v4();

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, SUPER_ADMIN_EMAIL)),
            ("x-active-tenant", Uuid::new_v4().to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "tenant not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_super_admin_prefers_membership_row(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Home", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    create_app_user(&pool, user_id, SUPER_ADMIN_EMAIL, false).await;
    create_membership(&pool, user_id, tenant_id, "manager", Some(&["orders"]), 0).await;

    let app = setup_test_app(pool);
    let (status, body) = get_me(
        app,
        &[
            ("authorization", bearer_for(user_id, SUPER_ADMIN_EMAIL)),
            ("x-active-tenant", tenant_id.to_string()),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "membership");
    assert_eq!(body["role"], "manager");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_without_memberships_has_no_tenant_access(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();

    let app = setup_test_app(pool);
    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "no tenant access");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_legacy_fallback_when_configured(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Legacy Tenant", "retail", &["orders"]).await;

    let mut config = test_auth_config();
    config.legacy_fallback_tenant = Some(tenant_id);
    let app = setup_test_app_with_config(pool, config);

    let (status, body) = get_me(app, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "fallback");
    assert_eq!(body["tenant_id"], tenant_id.to_string());
    assert_eq!(body["role"], "tenant_admin");
    assert_eq!(body["user_id"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_fallback_does_not_resurrect_disabled_accounts(pool: PgPool) {
    // A disabled account presenting a valid token must stay blocked even
    // when the lax fallback path is enabled for anonymous traffic.
    let tenant_id = create_tenant(&pool, "Legacy Tenant", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, true).await;
    create_membership(&pool, user_id, tenant_id, "tenant_admin", None, 0).await;

    let mut config = test_auth_config();
    config.legacy_fallback_tenant = Some(tenant_id);
    let app = setup_test_app_with_config(pool, config);

    let (status, body) = get_me(app, &[("authorization", bearer_for(user_id, &email))]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "account disabled");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_does_not_overwrite_existing_email(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Acme", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    create_app_user(&pool, user_id, "original@tradebench.io", false).await;
    create_membership(&pool, user_id, tenant_id, "staff", None, 0).await;

    let app = setup_test_app(pool.clone());
    let (status, _body) = get_me(
        app,
        &[("authorization", bearer_for(user_id, "stale@tradebench.io"))],
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let email = sqlx::query_scalar::<_, Option<String>>(
        "SELECT email FROM app_users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(email.as_deref(), Some("original@tradebench.io"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_first_resolution_fills_in_missing_email(pool: PgPool) {
    let tenant_id = create_tenant(&pool, "Acme", "retail", &["orders"]).await;
    let user_id = Uuid::new_v4();
    // Seeded without an email, as an invite flow would leave it.
    sqlx::query("INSERT INTO app_users (id) VALUES ($1)")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();
    create_membership(&pool, user_id, tenant_id, "staff", None, 0).await;

    let app = setup_test_app(pool.clone());
    let (status, _body) = get_me(
        app,
        &[("authorization", bearer_for(user_id, "fresh@tradebench.io"))],
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let email = sqlx::query_scalar::<_, Option<String>>(
        "SELECT email FROM app_users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(email.as_deref(), Some("fresh@tradebench.io"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tenant_listing_matches_memberships(pool: PgPool) {
    let tenant_a = create_tenant(&pool, "Alpha", "retail", &["orders"]).await;
    let tenant_b = create_tenant(&pool, "Beta", "services", &["reports"]).await;
    let user_id = Uuid::new_v4();
    let email = generate_unique_email();
    create_app_user(&pool, user_id, &email, false).await;
    create_membership(&pool, user_id, tenant_a, "tenant_admin", None, 5).await;
    create_membership(&pool, user_id, tenant_b, "staff", None, 1).await;

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri("/api/tenants")
        .header("authorization", bearer_for(user_id, &email))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Oldest first, same order the resolver uses for the default tenant.
    assert_eq!(rows[0]["tenant_id"], tenant_a.to_string());
    assert_eq!(rows[0]["role"], "tenant_admin");
    assert_eq!(rows[1]["tenant_id"], tenant_b.to_string());
}
