//! # Tradebench Core
//!
//! Core types shared across the Tradebench API workspace:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`features`]: canonical feature names and the effective-feature algebra
//!
//! # Example
//!
//! ```ignore
//! use tradebench_core::errors::AppError;
//! use tradebench_core::features;
//!
//! let err = AppError::not_found(anyhow::anyhow!("tenant not found"));
//!
//! let effective = features::effective_features(&tenant_features, member_features.as_deref());
//! ```

pub mod errors;
pub mod features;

// Re-export commonly used types at crate root
pub use errors::AppError;
