//! Database connection pool initialization.
//!
//! The database URL is read from the `DATABASE_URL` environment variable.
//!
//! # Panics
//!
//! [`init_db_pool`] panics when `DATABASE_URL` is unset or the connection
//! fails — both are deployment errors, identical for every request.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

/// Initialize a PostgreSQL connection pool.
///
/// Called once during startup; the returned pool is cheaply cloneable and is
/// shared through the application state.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPoolOptions::new()
        .max_connections(
            env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        )
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
