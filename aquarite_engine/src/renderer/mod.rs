/// Renderer module - frame pipeline, culling strategies and the backend
/// interface.

pub mod graphics_backend;
pub mod culler;
pub mod lighting;
pub mod renderer;

#[cfg(test)]
pub(crate) mod mock_backend;

pub use graphics_backend::*;
pub use culler::{Culler, BruteForceCuller, FrustumCuller};
pub use lighting::{LightingBlock, PointLightUniform, DirLightUniform, MAX_LIGHTS};
pub use renderer::{Renderer, FramePhase, DrawEntry, RendererStats, model_matrix};
