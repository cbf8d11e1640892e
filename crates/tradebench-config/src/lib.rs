//! # Tradebench Config
//!
//! Configuration types for the Tradebench API.
//!
//! Each config struct is loaded once at process start via `from_env()` and
//! passed into the application state as an immutable value, keeping request
//! handling a pure function of (request, DB snapshot, config):
//!
//! - [`auth`]: token secrets, super-admin allow-list, deny-list, legacy fallback
//! - [`session`]: employee session cookie settings
//! - [`cors`]: CORS allowed origins
//!
//! # Example
//!
//! ```ignore
//! use tradebench_config::{AuthConfig, CorsConfig, SessionConfig};
//!
//! let auth = AuthConfig::from_env();
//! let session = SessionConfig::from_env();
//! let cors = CorsConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod session;

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use session::{SameSitePolicy, SessionConfig};
