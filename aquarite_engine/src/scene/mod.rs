//! Scene module
//!
//! Provides the entity tree, per-entity transforms and light components.

mod entity;
mod light;
mod scene;

pub use entity::{wrap_rotation, Behavior, Entity, EntityKey, RenderMode, Transform};
pub use light::{Light, LightKind};
pub use scene::Scene;
