use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::get_my_tenants;

pub fn init_tenants_router() -> Router<AppState> {
    Router::new().route("/", get(get_my_tenants))
}
