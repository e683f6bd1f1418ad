/// Aquarite Engine - explicit context owning the engine subsystems
///
/// `Core` owns the scene, the resource manager, the renderer and the frame
/// timer, and runs one frame at a time in a fixed order. Cameras and the
/// graphics backend are owned by the caller and lent to each frame.
///
/// # Example
///
/// ```no_run
/// use aquarite_engine::aquarite::{Core, EngineConfig, FpsCamera, GraphicsBackend};
///
/// fn main_loop(backend: &mut dyn GraphicsBackend) -> aquarite_engine::aquarite::Result<()> {
///     let mut core = Core::new(EngineConfig::default());
///     let mut camera = FpsCamera::new();
///     loop {
///         core.run_frame(0.016, camera.as_mut(), backend)?;
///     }
/// }
/// ```

use crate::camera::Camera;
use crate::config::{EngineConfig, Resolution};
use crate::error::Result;
use crate::{engine_bail, engine_info};
use crate::renderer::{GraphicsBackend, Renderer, TextCommand};
use crate::resource::ResourceManager;
use crate::scene::{Entity, EntityKey, Scene};
use crate::time::FrameTimer;

pub struct Core {
    config: EngineConfig,
    scene: Scene,
    resources: ResourceManager,
    renderer: Renderer,
    timer: FrameTimer,
    pending_text: Vec<TextCommand>,
}

impl Core {
    pub fn new(config: EngineConfig) -> Self {
        engine_info!("aquarite::Core", "Engine created ({}x{}, fov {}°)",
            config.resolution.width, config.resolution.height, config.projection.fov_degrees);

        Self {
            scene: Scene::new(),
            resources: ResourceManager::new(),
            renderer: Renderer::new(config.features),
            timer: FrameTimer::new(),
            pending_text: Vec::new(),
            config,
        }
    }

    /// Run one frame.
    ///
    /// Order: advance time; update the camera direction and propagate
    /// transforms; set projection and frustum intrinsics, then rebuild the
    /// frustum planes; collect, cull, sort and draw; swap buffers.
    ///
    /// The camera's direction is recomputed from its yaw and pitch.
    pub fn run_frame(
        &mut self,
        delta_time: f32,
        camera: &mut Camera,
        backend: &mut dyn GraphicsBackend,
    ) -> Result<()> {
        self.timer.advance(delta_time);

        camera.update_front();
        self.scene.propagate_transforms(self.timer.delta_time());

        self.renderer.update_view(camera, &self.config.projection, self.config.resolution)?;
        camera.rebuild_frustum()?;

        self.renderer.begin_frame();
        self.scene.collect(&mut self.renderer)?;
        for text in self.pending_text.drain(..) {
            self.renderer.add_text(text)?;
        }
        self.renderer.cull(&self.scene, &self.resources, camera.frustum())?;
        self.renderer.sort(&self.scene, camera.position())?;
        self.renderer.draw(&self.scene, &self.resources, backend)?;

        backend.swap_buffers()
    }

    /// Record a new canvas size. Takes effect on the next frame.
    pub fn on_resize(&mut self, resolution: Resolution) {
        engine_info!("aquarite::Core", "Resized to {}x{}", resolution.width, resolution.height);
        self.config.resolution = resolution;
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.config.projection.fov_degrees
    }

    /// Set the vertical field of view. Negative values are clamped to 0,
    /// which the next frame rejects as invalid geometry.
    pub fn set_fov(&mut self, degrees: f32) {
        self.config.projection.fov_degrees = degrees.max(0.0);
    }

    /// Queue a line of text for the next frame only.
    pub fn queue_text(&mut self, text: TextCommand) {
        self.pending_text.push(text);
    }

    /// Spawn an entity carrying a light under the root and register it.
    ///
    /// Returns the key even when the light limit prevented registration.
    ///
    /// # Errors
    ///
    /// Returns an error, without spawning, if the entity carries no light.
    pub fn spawn_light(&mut self, entity: Entity) -> Result<EntityKey> {
        if entity.light().is_none() {
            engine_bail!(InvalidResource, "aquarite::Core", "Entity '{}' has no light", entity.name());
        }
        let key = self.scene.spawn(entity);
        self.renderer.add_light(key, &self.scene)?;
        Ok(key)
    }

    /// Register an existing light entity. See [`Renderer::add_light`].
    pub fn register_light(&mut self, key: EntityKey) -> Result<bool> {
        self.renderer.add_light(key, &self.scene)
    }

    /// Destroy an entity with its subtree and drop their light registrations.
    pub fn remove_entity(&mut self, key: EntityKey) -> Result<Vec<EntityKey>> {
        let removed = self.scene.destroy(key)?;
        self.renderer.remove_lights(&removed);
        Ok(removed)
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
