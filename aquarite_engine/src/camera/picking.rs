/// MousePicker - turns a cursor position into a world-space ray direction.
///
/// Screen coordinates have their origin at the top-left corner, Y down.
/// The ray starts at the camera position.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::config::Resolution;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct MousePicker {
    current_ray: Vec3,
}

impl MousePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and store the ray for this frame.
    pub fn update(
        &mut self,
        cursor: Vec2,
        resolution: Resolution,
        projection: &Mat4,
        view: &Mat4,
    ) -> Result<Vec3> {
        self.current_ray = Self::compute_ray(cursor, resolution, projection, view)?;
        Ok(self.current_ray)
    }

    /// Ray computed by the last successful [`update`](Self::update).
    pub fn current_ray(&self) -> Vec3 {
        self.current_ray
    }

    /// Normalized world-space direction through `cursor`.
    pub fn compute_ray(
        cursor: Vec2,
        resolution: Resolution,
        projection: &Mat4,
        view: &Mat4,
    ) -> Result<Vec3> {
        let ndc = Self::normalized_device_coordinates(cursor, resolution)?;
        let clip = Vec4::new(ndc.x, ndc.y, -1.0, 1.0);

        // Unproject onto the near plane, then keep only the direction
        let eye = projection.inverse() * clip;
        let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

        let world = (view.inverse() * eye).truncate();
        world.try_normalize().ok_or_else(|| {
            Error::InvalidGeometry(format!("degenerate pick ray for cursor {:?}", cursor))
        })
    }

    /// Map pixels to [-1, 1] with +Y up.
    pub fn normalized_device_coordinates(cursor: Vec2, resolution: Resolution) -> Result<Vec2> {
        if resolution.width == 0 || resolution.height == 0 {
            return Err(Error::InvalidGeometry(format!(
                "cannot pick on a {}x{} canvas", resolution.width, resolution.height
            )));
        }
        let x = 2.0 * cursor.x / resolution.width as f32 - 1.0;
        let y = 2.0 * cursor.y / resolution.height as f32 - 1.0;
        Ok(Vec2::new(x, -y))
    }
}
