/// Entity - a node of the scene tree.
///
/// Fixed composition: a local transform, a derived global transform, at most
/// one model, at most one light and an optional behavior hook. Hierarchy links
/// are arena keys managed by [`Scene`](super::Scene).

use std::sync::atomic::{AtomicU32, Ordering};
use glam::Vec3;
use slotmap::new_key_type;
use crate::resource::ModelKey;
use super::light::Light;

new_key_type! {
    /// Stable key for an Entity within a Scene.
    ///
    /// Keys remain valid even after other entities are destroyed.
    pub struct EntityKey;
}

/// Process-wide entity id counter
static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(0);

/// Where an entity with a model is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Culled, depth-sorted 3D draw
    #[default]
    WorldSpace,
    /// 2D sprite drawn after all 3D content, never culled
    ScreenSpace,
}

/// Position, rotation (degrees per axis) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Compose with a parent's global transform.
    ///
    /// Every component adds, scale included: a child with scale (1,1,1)
    /// under a parent with global scale (1,1,1) ends up at (2,2,2).
    pub fn compose(parent: &Transform, local: &Transform) -> Transform {
        Transform {
            position: parent.position + local.position,
            rotation: parent.rotation + local.rotation,
            scale: parent.scale + local.scale,
        }
    }
}

/// Per-frame hook run after an entity's subtree has been propagated.
pub trait Behavior: Send {
    fn update(&mut self, entity: &mut Entity, delta_time: f32);
}

/// Snap each rotation axis into [0, 360]: above 360 becomes 0, below 0
/// becomes 360.
pub fn wrap_rotation(rotation: Vec3) -> Vec3 {
    fn wrap(angle: f32) -> f32 {
        if angle > 360.0 {
            0.0
        } else if angle < 0.0 {
            360.0
        } else {
            angle
        }
    }
    Vec3::new(wrap(rotation.x), wrap(rotation.y), wrap(rotation.z))
}

pub struct Entity {
    id: u32,
    name: String,
    local: Transform,
    global: Transform,
    pub(crate) parent: Option<EntityKey>,
    pub(crate) children: Vec<EntityKey>,
    model: Option<ModelKey>,
    light: Option<Light>,
    render_mode: RenderMode,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("local", &self.local)
            .field("global", &self.global)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("model", &self.model)
            .field("light", &self.light)
            .field("render_mode", &self.render_mode)
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new("Entity")
    }
}

impl Entity {
    /// Create a detached entity with the next process-wide id.
    pub fn new(name: &str) -> Self {
        Self {
            id: NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            local: Transform::default(),
            global: Transform::default(),
            parent: None,
            children: Vec::new(),
            model: None,
            light: None,
            render_mode: RenderMode::WorldSpace,
            behavior: None,
        }
    }

    pub fn with_model(mut self, model: ModelKey) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.local.position = position;
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    // ===== LOCAL TRANSFORM =====

    pub fn set_position(&mut self, position: Vec3) {
        self.local.position = position;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.local.position += offset;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.local.rotation = wrap_rotation(rotation);
    }

    /// Add to the rotation, then wrap the sum.
    pub fn rotate(&mut self, delta: Vec3) {
        self.local.rotation = wrap_rotation(self.local.rotation + delta);
    }

    /// Negative components are clamped to 0.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.local.scale = scale.max(Vec3::ZERO);
    }

    // ===== GETTERS =====

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local(&self) -> &Transform {
        &self.local
    }

    /// Transform derived by the last propagation pass
    pub fn global(&self) -> &Transform {
        &self.global
    }

    pub fn position(&self) -> Vec3 {
        self.local.position
    }

    pub fn global_position(&self) -> Vec3 {
        self.global.position
    }

    pub fn parent(&self) -> Option<EntityKey> {
        self.parent
    }

    pub fn children(&self) -> &[EntityKey] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<EntityKey> {
        self.children.get(index).copied()
    }

    pub fn model(&self) -> Option<ModelKey> {
        self.model
    }

    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    pub fn light_mut(&mut self) -> Option<&mut Light> {
        self.light.as_mut()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    // ===== SETTERS =====

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_model(&mut self, model: Option<ModelKey>) {
        self.model = model;
    }

    pub fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    pub fn set_behavior(&mut self, behavior: Option<Box<dyn Behavior>>) {
        self.behavior = behavior;
    }

    pub(crate) fn set_global(&mut self, global: Transform) {
        self.global = global;
    }
}
