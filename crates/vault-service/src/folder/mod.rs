//! Folder organization.

pub mod service;

pub use service::{CreateFolderRequest, FolderService};
