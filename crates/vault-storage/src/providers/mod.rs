//! Asset store providers.

pub mod cloudinary;
pub mod local;

pub use cloudinary::CloudinaryAssetStore;
pub use local::LocalAssetStore;
