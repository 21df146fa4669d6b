//! Image entity.

pub mod model;

pub use model::{CreateImage, Image, UpdateImage};
