//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success wrapper for list endpoints; carries the item count alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Number of items returned.
    pub count: usize,
    /// The items.
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    /// Creates a successful list response.
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Body returned by deletion endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database reachability.
    pub database: String,
    /// Asset store provider in use.
    pub asset_store: String,
}
