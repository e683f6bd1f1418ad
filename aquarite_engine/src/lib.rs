/*!
# Aquarite Engine

Core of a small real-time 3D engine: view-frustum geometry, cameras, an
entity tree with transform propagation and a renderer that collects, culls,
sorts and draws visible entities through a pluggable graphics backend.

## Architecture

- **Core**: explicit context owning the scene, resources, renderer and timer
- **Plane / Frustum**: containment queries for points and bounding spheres
- **Camera / FpsCamera**: caller-owned cameras driving the view
- **Scene**: entity tree with local/global transforms and behaviors
- **Renderer**: Idle → Collecting → Culled → Sorted → Idle frame pipeline
- **GraphicsBackend**: trait implemented by the platform layer

Everything public is re-exported through the [`aquarite`] namespace module.
*/

// Internal modules
mod config;
mod engine;
mod error;
mod time;
pub mod camera;
pub mod log;
pub mod renderer;
pub mod resource;
pub mod scene;

// Main aquarite namespace module
pub mod aquarite {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine context
    pub use crate::engine::Core;

    // Configuration
    pub use crate::config::{EngineConfig, ProjectionConfig, RenderFeatures, Resolution};

    // Frame timing
    pub use crate::time::FrameTimer;

    // Cameras and frustum geometry
    pub use crate::camera::*;

    // Frame pipeline and backend interface
    pub use crate::renderer::*;

    // Models and resource storage
    pub use crate::resource::*;

    // Entity tree
    pub use crate::scene::*;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{set_logger, reset_logger, Logger, LogEntry, LogSeverity, DefaultLogger};
    }
}

// Re-export math library at crate root
pub use glam;
