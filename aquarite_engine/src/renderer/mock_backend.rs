/// Mock graphics backend for unit tests (no GPU required)
///
/// Records every call as a short string so tests can assert on the exact
/// command stream the renderer produced.

use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;
use super::graphics_backend::{
    GraphicsBackend, MeshBufferHandle, ShaderHandle, TextCommand, TextureHandle, UniformValue,
};

#[derive(Debug, Default)]
pub struct MockBackend {
    pub commands: Vec<String>,
    pub uniforms: Vec<(String, UniformValue)>,
    pub blocks: Vec<(String, Vec<u8>)>,
    /// Command name that fails when issued
    pub fail_on: Option<&'static str>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose name starts with `prefix`
    pub fn commands_named(&self, prefix: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| c.as_str())
            .collect()
    }

    /// Last value set for a uniform name
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.iter().rev().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    fn record(&mut self, name: &'static str, command: String) -> Result<()> {
        if self.fail_on == Some(name) {
            engine_bail!(BackendError, "aquarite::MockBackend", "{} failed", name);
        }
        self.commands.push(command);
        Ok(())
    }
}

impl GraphicsBackend for MockBackend {
    fn bind_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.record("bind_shader", format!("bind_shader({})", shader.0))
    }

    fn bind_mesh(&mut self, mesh: MeshBufferHandle) -> Result<()> {
        self.record("bind_mesh", format!("bind_mesh({})", mesh.0))
    }

    fn bind_texture(&mut self, texture: TextureHandle) -> Result<()> {
        self.record("bind_texture", format!("bind_texture({})", texture.0))
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        self.uniforms.push((name.to_string(), value));
        Ok(())
    }

    fn set_uniform_block(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.blocks.push((name.to_string(), data.to_vec()));
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()> {
        self.record("draw_triangles", format!("draw_triangles({})", vertex_count))
    }

    fn draw_skybox(&mut self, _view: &Mat4, _projection: &Mat4) -> Result<()> {
        self.record("draw_skybox", "draw_skybox".to_string())
    }

    fn draw_text(&mut self, text: &TextCommand) -> Result<()> {
        self.record("draw_text", format!("draw_text({})", text.text))
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        self.record("set_depth_test", format!("set_depth_test({})", enabled))
    }

    fn bind_offscreen_target(&mut self) -> Result<()> {
        self.record("bind_offscreen_target", "bind_offscreen_target".to_string())
    }

    fn blit_offscreen_to_screen(&mut self) -> Result<()> {
        self.record("blit_offscreen_to_screen", "blit_offscreen_to_screen".to_string())
    }

    fn clear(&mut self) -> Result<()> {
        self.record("clear", "clear".to_string())
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.record("swap_buffers", "swap_buffers".to_string())
    }
}
