//! User registration, login, and profile.

pub mod service;

pub use service::{AuthenticatedUser, LoginRequest, RegisterRequest, UserService};
