//! # vault-storage
//!
//! Asset store implementations for ImageVault. The [`AssetStore`] trait
//! lives in `vault-core`; this crate provides the Cloudinary HTTP provider,
//! a local filesystem provider for development and tests, and the factory
//! that builds the configured one.
//!
//! [`AssetStore`]: vault_core::traits::AssetStore

pub mod factory;
pub mod providers;

pub use factory::build_asset_store;
