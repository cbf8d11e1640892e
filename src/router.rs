use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::actor::EMPLOYEE_TOKEN_HEADER;
use crate::middleware::auth::{ACTIVE_TENANT_HEADER, LEGACY_TENANT_HEADER};
use crate::modules::auth::router::init_auth_router;
use crate::modules::employees::router::{init_employee_session_router, init_employees_router};
use crate::modules::tenants::controller::get_workspace;
use crate::modules::tenants::router::init_tenants_router;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/tenants", init_tenants_router())
                .nest("/employees", init_employees_router())
                .nest("/employee-session", init_employee_session_router())
                .route("/workspace", get(get_workspace)),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    HeaderName::from_static(ACTIVE_TENANT_HEADER),
                    HeaderName::from_static(LEGACY_TENANT_HEADER),
                    HeaderName::from_static(EMPLOYEE_TOKEN_HEADER),
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
