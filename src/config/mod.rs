//! Application configuration.
//!
//! Connection-level setup lives here; everything policy-shaped (secrets,
//! allow-lists, cookie attributes) is in the `tradebench-config` crate and is
//! loaded once into [`crate::state::AppState`].

pub mod database;
