//! Image upload, browsing, search, and deletion.

pub mod service;

pub use service::{ImageService, UploadRequest};
