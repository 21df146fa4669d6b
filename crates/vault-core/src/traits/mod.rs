//! Shared traits defined in core and implemented by other crates.

pub mod asset_store;

pub use asset_store::{AssetStore, RemoveOutcome, StoredAsset};
