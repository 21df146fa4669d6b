//! Repository traits and their PostgreSQL implementations, one per entity.

pub mod folder;
pub mod image;
pub mod user;

pub use folder::{FolderRepository, PgFolderRepository};
pub use image::{ImageRepository, PgImageRepository};
pub use user::{PgUserRepository, UserRepository};
