use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_session, create_share_link, delete_session, get_session, issue_access_token,
    redeem_share_link,
};

/// Admin-facing employee credential management.
pub fn init_employees_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/access-token", post(issue_access_token))
        .route("/{id}/share-link", post(create_share_link))
}

/// Employee-facing session lifecycle.
pub fn init_employee_session_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session).get(get_session).delete(delete_session))
        .route("/redeem-link", post(redeem_share_link))
}
