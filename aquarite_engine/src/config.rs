//! Engine configuration
//!
//! Plain data with `Default` values. The frame driver reads it once per frame;
//! changing the projection or resolution takes effect on the next frame.

use bitflags::bitflags;

bitflags! {
    /// Optional render passes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderFeatures: u32 {
        /// Issue a skybox draw between the Default and Late passes
        const SKYBOX                = 1 << 0;
        /// Render into an off-screen color target and blit it to the screen quad
        const OFFSCREEN_TO_SCREEN   = 1 << 1;
    }
}

impl Default for RenderFeatures {
    fn default() -> Self {
        RenderFeatures::SKYBOX
    }
}

/// Canvas resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height. A zero height (minimized window) yields 1.0 so the
    /// frustum stays configurable.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Resolution {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Perspective projection parameters (the frustum's intrinsics)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    pub resolution: Resolution,
    pub projection: ProjectionConfig,
    pub features: RenderFeatures,
}
