/// Graphics backend trait and the handle types it understands.
///
/// The renderer decides WHAT to draw and in which order; a backend
/// (OpenGL, wgpu, a recording mock, ...) turns those calls into GPU work.
/// Handles are opaque ids minted by the backend when the loader uploads
/// shaders, meshes and textures.

use glam::{Mat4, Vec2, Vec3};
use crate::error::Result;

/// Compiled shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Uploaded vertex data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshBufferHandle(pub u32);

/// Uploaded 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Value for a named uniform of the currently bound shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Mat4(Mat4),
}

/// A line of screen-space text, drawn after sprites.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    /// Pixels from the top-left corner
    pub position: Vec2,
    pub scale: f32,
    pub color: Vec3,
}

impl TextCommand {
    pub fn new(text: &str, position: Vec2) -> Self {
        Self {
            text: text.to_string(),
            position,
            scale: 1.0,
            color: Vec3::ONE,
        }
    }
}

/// Immediate-mode drawing interface.
///
/// Every call may fail; the renderer propagates backend errors to the
/// caller unchanged.
pub trait GraphicsBackend {
    fn bind_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    fn bind_mesh(&mut self, mesh: MeshBufferHandle) -> Result<()>;

    fn bind_texture(&mut self, texture: TextureHandle) -> Result<()>;

    /// Set a uniform on the currently bound shader.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()>;

    /// Upload a packed block of uniform data (std140 layout).
    fn set_uniform_block(&mut self, name: &str, data: &[u8]) -> Result<()>;

    /// Draw `vertex_count` vertices of the bound mesh as a triangle list.
    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()>;

    /// Draw the environment cube around the camera.
    fn draw_skybox(&mut self, view: &Mat4, projection: &Mat4) -> Result<()>;

    fn draw_text(&mut self, text: &TextCommand) -> Result<()>;

    fn set_depth_test(&mut self, enabled: bool) -> Result<()>;

    /// Redirect subsequent draws into the off-screen color target.
    fn bind_offscreen_target(&mut self) -> Result<()>;

    /// Copy the off-screen target onto the default framebuffer as a
    /// full-screen quad.
    fn blit_offscreen_to_screen(&mut self) -> Result<()>;

    /// Clear color and depth of the current target.
    fn clear(&mut self) -> Result<()>;

    fn swap_buffers(&mut self) -> Result<()>;
}
