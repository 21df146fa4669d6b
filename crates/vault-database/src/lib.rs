//! # vault-database
//!
//! PostgreSQL connection management plus the repository traits and their
//! sqlx implementations for all ImageVault entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
