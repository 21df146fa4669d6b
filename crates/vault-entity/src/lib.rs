//! # vault-entity
//!
//! Domain entity models for ImageVault. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod folder;
pub mod image;
pub mod name;
pub mod user;

pub use name::validate_entity_name;
