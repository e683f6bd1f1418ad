//! Resource management module
//!
//! Provides model descriptions and centralized storage for them.

mod model;
mod resource_manager;

pub use model::{DrawMode, Material, Mesh, Model};
pub use resource_manager::{ModelKey, ResourceManager};
