/// Light - a capability attached to an entity.
///
/// A point light shines from its entity's global position; a directional
/// light only uses its direction.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point,
    Directional { direction: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    fn with_kind(kind: LightKind) -> Self {
        Self {
            kind,
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(1.0),
        }
    }

    pub fn point() -> Self {
        Self::with_kind(LightKind::Point)
    }

    pub fn directional(direction: Vec3) -> Self {
        Self::with_kind(LightKind::Directional { direction })
    }

    pub fn is_point(&self) -> bool {
        matches!(self.kind, LightKind::Point)
    }
}
