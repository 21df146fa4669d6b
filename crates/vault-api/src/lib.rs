//! # vault-api
//!
//! HTTP API layer for ImageVault built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, tracing, request
//! logging), extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
