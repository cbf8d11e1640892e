pub mod auth;
pub mod employees;
pub mod tenants;

pub use self::auth::model::AuthorizationContext;
pub use self::tenants::model::Tenant;
