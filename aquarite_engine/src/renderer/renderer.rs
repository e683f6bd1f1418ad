/// Renderer - per-frame collect → cull → sort → draw state machine.
///
/// Each frame walks the phases in order:
///
/// ```text
/// Idle ──begin_frame──▶ Collecting ──cull──▶ Culled ──sort──▶ Sorted ──draw──▶ Idle
/// ```
///
/// Calling an operation out of order is an `InvalidState` error. The draw,
/// UI and text lists are replaced by fresh containers at `begin_frame`; they
/// never outlive the frame they were collected in.

use glam::{Mat4, Vec2, Vec3};
use crate::camera::{Camera, Frustum};
use crate::config::{ProjectionConfig, RenderFeatures, Resolution};
use crate::error::Result;
use crate::{engine_bail, engine_error, engine_trace, engine_warn};
use crate::resource::{DrawMode, Model, ResourceManager};
use crate::scene::{Entity, EntityKey, Scene};
use super::culler::{self, Culler, FrustumCuller};
use super::graphics_backend::{GraphicsBackend, MeshBufferHandle, ShaderHandle, TextCommand, UniformValue};
use super::lighting::{LightingBlock, DIR_LIGHT_BLOCK, MAX_LIGHTS, POINT_LIGHTS_BLOCK};

/// Progress of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Collecting,
    Culled,
    Sorted,
}

/// A world-space entity queued for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEntry {
    pub entity: EntityKey,
    /// Camera distance, filled by `sort`
    pub distance: f32,
}

/// Counters for the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// World-space entries registered during collection
    pub collected: u32,
    /// Entries removed by the culler: outside the frustum, or rejected for
    /// non-finite bounds
    pub culled: u32,
    /// Entries dropped before culling because their entity or model is gone
    pub dropped: u32,
    pub drawn_meshes: u32,
    pub draw_calls: u32,
    pub shader_binds: u32,
    pub mesh_binds: u32,
    /// Models skipped for a mesh/material count mismatch
    pub skipped_models: u32,
    /// Meshes skipped for a missing shader or mesh buffer
    pub skipped_meshes: u32,
    pub sprites: u32,
    pub texts: u32,
}

/// Last shader and mesh buffer bound, to elide adjacent duplicate binds.
#[derive(Debug, Default)]
struct BindTracker {
    shader: Option<ShaderHandle>,
    mesh: Option<MeshBufferHandle>,
}

impl BindTracker {
    fn reset(&mut self) {
        self.shader = None;
        self.mesh = None;
    }
}

pub struct Renderer {
    phase: FramePhase,
    features: RenderFeatures,
    culler: Box<dyn Culler>,

    draw_list: Vec<DrawEntry>,
    ui_list: Vec<EntityKey>,
    text_list: Vec<TextCommand>,
    lights: Vec<EntityKey>,

    view: Mat4,
    projection: Mat4,
    view_position: Vec3,

    tracker: BindTracker,
    stats: RendererStats,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderFeatures::default())
    }
}

impl Renderer {
    /// Create a renderer using frustum culling.
    pub fn new(features: RenderFeatures) -> Self {
        Self {
            phase: FramePhase::Idle,
            features,
            culler: Box::new(FrustumCuller::new()),
            draw_list: Vec::new(),
            ui_list: Vec::new(),
            text_list: Vec::new(),
            lights: Vec::new(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_position: Vec3::ZERO,
            tracker: BindTracker::default(),
            stats: RendererStats::default(),
        }
    }

    /// Replace the culling strategy.
    pub fn set_culler(&mut self, culler: Box<dyn Culler>) {
        self.culler = culler;
    }

    fn expect_phase(&self, expected: FramePhase, operation: &str) -> Result<()> {
        if self.phase != expected {
            engine_bail!(InvalidState, "aquarite::Renderer",
                "{} called in {:?} phase (expected {:?})", operation, self.phase, expected);
        }
        Ok(())
    }

    // ===== VIEW =====

    /// Derive view and projection from the camera and push the projection
    /// intrinsics into the camera's frustum.
    ///
    /// Leaves the frustum `Configured`; the caller rebuilds its planes with
    /// `Camera::rebuild_frustum` once the pose is final.
    pub fn update_view(
        &mut self,
        camera: &mut Camera,
        projection: &ProjectionConfig,
        resolution: Resolution,
    ) -> Result<()> {
        let aspect = resolution.aspect_ratio();

        camera.frustum_mut().set_cam_internals(
            projection.fov_degrees,
            aspect,
            projection.near,
            projection.far,
        )?;

        self.projection = Mat4::perspective_rh_gl(
            projection.fov_degrees.to_radians(),
            aspect,
            projection.near,
            projection.far,
        );
        self.view = camera.view_matrix();
        self.view_position = camera.position();
        Ok(())
    }

    // ===== LIGHTS =====

    /// Register a light entity.
    ///
    /// Returns `Ok(false)` without registering when the entity is already
    /// registered or `MAX_LIGHTS` lights are registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or has no light.
    pub fn add_light(&mut self, key: EntityKey, scene: &Scene) -> Result<bool> {
        let has_light = scene.entity(key).is_some_and(|e| e.light().is_some());
        if !has_light {
            engine_bail!(InvalidResource, "aquarite::Renderer",
                "add_light: entity {:?} does not exist or has no light", key);
        }
        if self.lights.contains(&key) {
            return Ok(false);
        }
        if self.lights.len() >= MAX_LIGHTS {
            engine_warn!("aquarite::Renderer",
                "Light limit of {} reached, light {:?} not registered", MAX_LIGHTS, key);
            return Ok(false);
        }
        self.lights.push(key);
        Ok(true)
    }

    /// Unregister a light. Returns false if it was not registered.
    pub fn remove_light(&mut self, key: EntityKey) -> bool {
        let before = self.lights.len();
        self.lights.retain(|&k| k != key);
        self.lights.len() != before
    }

    /// Unregister every key in `keys` (e.g. a destroyed subtree).
    pub fn remove_lights(&mut self, keys: &[EntityKey]) {
        self.lights.retain(|k| !keys.contains(k));
    }

    // ===== FRAME PHASES =====

    /// Start collecting a new frame.
    ///
    /// Allowed from any phase: an unfinished frame (e.g. one whose draw
    /// failed) is discarded with a warning.
    pub fn begin_frame(&mut self) {
        if self.phase != FramePhase::Idle {
            engine_warn!("aquarite::Renderer",
                "begin_frame in {:?} phase, discarding the unfinished frame", self.phase);
        }
        self.draw_list = Vec::new();
        self.ui_list = Vec::new();
        self.text_list = Vec::new();
        self.stats = RendererStats::default();
        self.phase = FramePhase::Collecting;
    }

    /// Queue a world-space entity.
    pub fn register_entity(&mut self, key: EntityKey) -> Result<()> {
        self.expect_phase(FramePhase::Collecting, "register_entity")?;
        self.draw_list.push(DrawEntry { entity: key, distance: 0.0 });
        self.stats.collected += 1;
        Ok(())
    }

    /// Queue a screen-space entity (drawn as a sprite, never culled).
    pub fn register_sprite(&mut self, key: EntityKey) -> Result<()> {
        self.expect_phase(FramePhase::Collecting, "register_sprite")?;
        self.ui_list.push(key);
        Ok(())
    }

    /// Queue a line of text.
    pub fn add_text(&mut self, text: TextCommand) -> Result<()> {
        self.expect_phase(FramePhase::Collecting, "add_text")?;
        self.text_list.push(text);
        Ok(())
    }

    /// Drop draw entries the culler deems invisible.
    pub fn cull(&mut self, scene: &Scene, resources: &ResourceManager, frustum: &Frustum) -> Result<()> {
        self.expect_phase(FramePhase::Collecting, "cull")?;

        let mut entries = std::mem::take(&mut self.draw_list);
        let collected = entries.len();
        entries.retain(|entry| culler::resolve(entry, scene, resources).is_some());
        self.stats.dropped = (collected - entries.len()) as u32;

        let before = entries.len();
        self.draw_list = self.culler.cull(entries, scene, resources, frustum)?;
        self.stats.culled = (before - self.draw_list.len()) as u32;

        engine_trace!("aquarite::Renderer", "Culled {} of {} entries ({} dropped)",
            self.stats.culled, before, self.stats.dropped);
        self.phase = FramePhase::Culled;
        Ok(())
    }

    /// Order draw entries far to near by distance from `camera_position` to
    /// each entity's global position. Equal distances keep collection order.
    pub fn sort(&mut self, scene: &Scene, camera_position: Vec3) -> Result<()> {
        self.expect_phase(FramePhase::Culled, "sort")?;

        self.draw_list.retain(|entry| scene.contains(entry.entity));
        for entry in &mut self.draw_list {
            if let Some(entity) = scene.entity(entry.entity) {
                entry.distance = camera_position.distance(entity.global_position());
            }
        }
        self.draw_list.sort_by(|a, b| b.distance.total_cmp(&a.distance));

        self.phase = FramePhase::Sorted;
        Ok(())
    }

    /// Issue the frame's draw calls.
    ///
    /// Order: Default-mode entries, skybox, Late-mode entries, then sprites
    /// and text with depth testing off, then the off-screen blit. A model
    /// whose mesh and material counts differ is skipped with an error log;
    /// a mesh without shader or buffer is skipped with a warning. Backend
    /// failures abort the frame.
    pub fn draw(
        &mut self,
        scene: &Scene,
        resources: &ResourceManager,
        backend: &mut dyn GraphicsBackend,
    ) -> Result<()> {
        self.expect_phase(FramePhase::Sorted, "draw")?;

        let offscreen = self.features.contains(RenderFeatures::OFFSCREEN_TO_SCREEN);
        if offscreen {
            backend.bind_offscreen_target()?;
        }
        backend.clear()?;
        backend.set_depth_test(true)?;

        let lighting = LightingBlock::gather(&self.lights, scene);
        self.tracker.reset();

        let resolved: Vec<(&Entity, &Model)> = self
            .draw_list
            .iter()
            .filter_map(|entry| culler::resolve(entry, scene, resources))
            .collect();
        self.draw_pass(&resolved, DrawMode::Default, &lighting, backend)?;

        if self.features.contains(RenderFeatures::SKYBOX) {
            backend.draw_skybox(&self.view, &self.projection)?;
            self.tracker.reset();
        }

        self.draw_pass(&resolved, DrawMode::Late, &lighting, backend)?;

        backend.set_depth_test(false)?;
        self.tracker.reset();
        let ui_list = std::mem::take(&mut self.ui_list);
        for &key in &ui_list {
            self.draw_sprite(key, scene, resources, backend)?;
        }
        self.ui_list = ui_list;

        for text in &self.text_list {
            backend.draw_text(text)?;
            self.stats.texts += 1;
        }
        self.tracker.reset();
        backend.set_depth_test(true)?;

        if offscreen {
            backend.blit_offscreen_to_screen()?;
        }

        self.phase = FramePhase::Idle;
        Ok(())
    }

    fn draw_pass(
        &mut self,
        resolved: &[(&Entity, &Model)],
        mode: DrawMode,
        lighting: &LightingBlock,
        backend: &mut dyn GraphicsBackend,
    ) -> Result<()> {
        for &(entity, model) in resolved {
            if model.draw_mode == mode {
                self.draw_model(entity, model, lighting, backend)?;
            }
        }
        Ok(())
    }

    fn draw_model(
        &mut self,
        entity: &Entity,
        model: &Model,
        lighting: &LightingBlock,
        backend: &mut dyn GraphicsBackend,
    ) -> Result<()> {
        if !model.is_consistent() {
            engine_error!("aquarite::Renderer",
                "Model '{}' has {} meshes but {} materials, skipped",
                model.name(), model.meshes.len(), model.materials.len());
            self.stats.skipped_models += 1;
            return Ok(());
        }

        let model_matrix = model_matrix(entity);

        for (index, (mesh, material)) in model.meshes.iter().zip(&model.materials).enumerate() {
            let (Some(shader), Some(buffer)) = (material.shader, mesh.buffer) else {
                engine_warn!("aquarite::Renderer",
                    "Mesh {} of model '{}' has no shader or buffer, skipped", index, model.name());
                self.stats.skipped_meshes += 1;
                continue;
            };

            self.bind(shader, buffer, backend)?;

            backend.set_uniform("model", UniformValue::Mat4(model_matrix))?;
            backend.set_uniform("view", UniformValue::Mat4(self.view))?;
            backend.set_uniform("projection", UniformValue::Mat4(self.projection))?;
            backend.set_uniform("viewPos", UniformValue::Vec3(self.view_position))?;

            backend.set_uniform("material.ambientColor", UniformValue::Vec3(material.final_ambient()))?;
            backend.set_uniform("material.diffuseColor", UniformValue::Vec3(material.final_diffuse()))?;
            backend.set_uniform("material.specular", UniformValue::Vec3(material.specular))?;
            backend.set_uniform("material.shininess", UniformValue::Float(material.shininess))?;

            backend.set_uniform("hasTexture", UniformValue::Bool(material.diffuse_texture.is_some()))?;
            if let Some(texture) = material.diffuse_texture {
                backend.bind_texture(texture)?;
            }

            backend.set_uniform_block(POINT_LIGHTS_BLOCK, lighting.point_light_bytes())?;
            backend.set_uniform_block(DIR_LIGHT_BLOCK, lighting.directional_bytes())?;

            backend.draw_triangles(mesh.vertex_count)?;
            self.stats.drawn_meshes += 1;
            self.stats.draw_calls += 1;
        }
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        key: EntityKey,
        scene: &Scene,
        resources: &ResourceManager,
        backend: &mut dyn GraphicsBackend,
    ) -> Result<()> {
        let entry = DrawEntry { entity: key, distance: 0.0 };
        let Some((entity, model)) = culler::resolve(&entry, scene, resources) else {
            return Ok(());
        };
        if !model.is_consistent() {
            engine_error!("aquarite::Renderer",
                "Sprite model '{}' has {} meshes but {} materials, skipped",
                model.name(), model.meshes.len(), model.materials.len());
            self.stats.skipped_models += 1;
            return Ok(());
        }

        let position = entity.global_position();
        let scale = entity.local().scale;

        for (index, (mesh, material)) in model.meshes.iter().zip(&model.materials).enumerate() {
            let (Some(shader), Some(buffer)) = (material.shader, mesh.buffer) else {
                engine_warn!("aquarite::Renderer",
                    "Sprite mesh {} of model '{}' has no shader or buffer, skipped", index, model.name());
                self.stats.skipped_meshes += 1;
                continue;
            };

            self.bind(shader, buffer, backend)?;
            if let Some(texture) = material.diffuse_texture {
                backend.bind_texture(texture)?;
            }
            backend.set_uniform("position", UniformValue::Vec2(Vec2::new(position.x, position.y)))?;
            backend.set_uniform("scale", UniformValue::Vec2(Vec2::new(scale.x, scale.y)))?;
            backend.draw_triangles(mesh.vertex_count)?;
            self.stats.draw_calls += 1;
        }
        self.stats.sprites += 1;
        Ok(())
    }

    fn bind(
        &mut self,
        shader: ShaderHandle,
        buffer: MeshBufferHandle,
        backend: &mut dyn GraphicsBackend,
    ) -> Result<()> {
        if self.tracker.shader != Some(shader) {
            backend.bind_shader(shader)?;
            self.tracker.shader = Some(shader);
            self.stats.shader_binds += 1;
        }
        if self.tracker.mesh != Some(buffer) {
            backend.bind_mesh(buffer)?;
            self.tracker.mesh = Some(buffer);
            self.stats.mesh_binds += 1;
        }
        Ok(())
    }

    // ===== GETTERS =====

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn features(&self) -> RenderFeatures {
        self.features
    }

    pub fn set_features(&mut self, features: RenderFeatures) {
        self.features = features;
    }

    /// Current draw list (collection order until sorted)
    pub fn draw_list(&self) -> &[DrawEntry] {
        &self.draw_list
    }

    pub fn ui_list(&self) -> &[EntityKey] {
        &self.ui_list
    }

    pub fn text_list(&self) -> &[TextCommand] {
        &self.text_list
    }

    pub fn lights(&self) -> &[EntityKey] {
        &self.lights
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn stats(&self) -> &RendererStats {
        &self.stats
    }
}

/// `translate * rot_x * rot_y * rot_z * scale` from the global transform,
/// rotations in degrees.
pub fn model_matrix(entity: &Entity) -> Mat4 {
    let global = entity.global();
    Mat4::from_translation(global.position)
        * Mat4::from_rotation_x(global.rotation.x.to_radians())
        * Mat4::from_rotation_y(global.rotation.y.to_radians())
        * Mat4::from_rotation_z(global.rotation.z.to_radians())
        * Mat4::from_scale(global.scale)
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
