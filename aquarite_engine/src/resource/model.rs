/// Model - meshes paired one-to-one with materials, plus culling metadata.
///
/// Models are produced by an external loader. GPU objects are referenced by
/// backend handles only; the engine never creates or frees them.

use glam::Vec3;
use crate::renderer::{MeshBufferHandle, ShaderHandle, TextureHandle};

/// Which pass a world-space model is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Drawn before the skybox
    #[default]
    Default,
    /// Drawn after the skybox (transparent or overlay-like geometry)
    Late,
}

/// Vertex data uploaded by the loader.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertex_count: u32,
    /// `None` until the loader has uploaded the vertices
    pub buffer: Option<MeshBufferHandle>,
}

impl Mesh {
    pub fn new(vertex_count: u32, buffer: MeshBufferHandle) -> Self {
        Self { vertex_count, buffer: Some(buffer) }
    }
}

/// Surface parameters for one mesh.
#[derive(Debug, Clone)]
pub struct Material {
    pub shader: Option<ShaderHandle>,
    /// Base tint
    pub color: Vec3,
    pub diffuse_color: Vec3,
    pub ambient_color: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub diffuse_texture: Option<TextureHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shader: None,
            color: Vec3::ONE,
            diffuse_color: Vec3::ONE,
            ambient_color: Vec3::splat(0.1),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
            diffuse_texture: None,
        }
    }
}

impl Material {
    pub fn with_shader(shader: ShaderHandle) -> Self {
        Self { shader: Some(shader), ..Self::default() }
    }

    /// `color * diffuse_color`
    pub fn final_diffuse(&self) -> Vec3 {
        self.color * self.diffuse_color
    }

    /// `final_diffuse * ambient_color`
    pub fn final_ambient(&self) -> Vec3 {
        self.final_diffuse() * self.ambient_color
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    /// Indexed by the owning ResourceManager; rename through it
    pub(super) name: String,
    pub meshes: Vec<Mesh>,
    /// One per mesh, same order
    pub materials: Vec<Material>,
    /// Authored bounding sphere radius around the entity's global position
    pub sphere_radius: f32,
    /// Skip frustum culling entirely
    pub ignore_frustum: bool,
    pub draw_mode: DrawMode,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            name: String::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            sphere_radius: 1.0,
            ignore_frustum: false,
            draw_mode: DrawMode::Default,
        }
    }
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a mesh with its material.
    pub fn with_mesh(mut self, mesh: Mesh, material: Material) -> Self {
        self.meshes.push(mesh);
        self.materials.push(material);
        self
    }

    pub fn with_sphere_radius(mut self, radius: f32) -> Self {
        self.sphere_radius = radius;
        self
    }

    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    pub fn with_ignore_frustum(mut self, ignore: bool) -> Self {
        self.ignore_frustum = ignore;
        self
    }

    /// Meshes and materials pair up one-to-one.
    pub fn is_consistent(&self) -> bool {
        self.meshes.len() == self.materials.len()
    }
}
