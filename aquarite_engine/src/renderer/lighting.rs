/// Lighting uniform packing.
///
/// Registered light entities are gathered once per frame into fixed-size
/// std140 blocks: `MAX_LIGHTS` point lights (unused slots zeroed) and one
/// directional light. Every vec3 is padded to 16 bytes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::scene::{EntityKey, LightKind, Scene};

/// Maximum number of registered lights
pub const MAX_LIGHTS: usize = 25;

/// Uniform block names the renderer uploads
pub const POINT_LIGHTS_BLOCK: &str = "pointLights";
pub const DIR_LIGHT_BLOCK: &str = "dirLight";

fn pad(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DirLightUniform {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// One frame's packed lighting state.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingBlock {
    point_lights: [PointLightUniform; MAX_LIGHTS],
    point_light_count: usize,
    directional: DirLightUniform,
}

impl Default for LightingBlock {
    fn default() -> Self {
        Self {
            point_lights: [PointLightUniform::zeroed(); MAX_LIGHTS],
            point_light_count: 0,
            directional: DirLightUniform::zeroed(),
        }
    }
}

impl LightingBlock {
    /// Pack the lights of the given entities.
    ///
    /// Point lights fill slots in registration order from their entity's
    /// global position. With several directional lights the last one wins.
    /// Keys that no longer resolve to an entity with a light are skipped.
    pub fn gather(lights: &[EntityKey], scene: &Scene) -> Self {
        let mut block = Self::default();

        for &key in lights {
            let Some(entity) = scene.entity(key) else { continue };
            let Some(light) = entity.light() else { continue };

            match light.kind {
                LightKind::Point => {
                    if block.point_light_count == MAX_LIGHTS {
                        continue;
                    }
                    block.point_lights[block.point_light_count] = PointLightUniform {
                        position: pad(entity.global_position()),
                        ambient: pad(light.ambient),
                        diffuse: pad(light.diffuse),
                        specular: pad(light.specular),
                    };
                    block.point_light_count += 1;
                }
                LightKind::Directional { direction } => {
                    block.directional = DirLightUniform {
                        direction: pad(direction),
                        ambient: pad(light.ambient),
                        diffuse: pad(light.diffuse),
                        specular: pad(light.specular),
                    };
                }
            }
        }
        block
    }

    pub fn point_lights(&self) -> &[PointLightUniform] {
        &self.point_lights[..self.point_light_count]
    }

    pub fn directional(&self) -> &DirLightUniform {
        &self.directional
    }

    /// All `MAX_LIGHTS` point light slots as bytes
    pub fn point_light_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.point_lights[..])
    }

    pub fn directional_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.directional)
    }
}
