//! # vault-service
//!
//! Business logic service layer for ImageVault. Each service orchestrates
//! repositories, the asset store, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod folder;
pub mod image;
pub mod ownership;
pub mod user;

pub use context::RequestContext;
pub use folder::FolderService;
pub use image::ImageService;
pub use user::UserService;
