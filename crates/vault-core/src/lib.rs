//! # vault-core
//!
//! Core crate for ImageVault. Contains the unified error system,
//! configuration schemas, and the asset store trait.
//!
//! This crate has **no** internal dependencies on other ImageVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
