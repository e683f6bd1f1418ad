/// Camera - eye position, look direction and the frustum built from them.
///
/// `target` is a unit DIRECTION, not a point: the point looked at is
/// `position + target`. The camera exclusively owns its frustum and rebuilds
/// it once per frame from its current pose.
///
/// The engine does NOT store cameras. They are owned by the caller and passed
/// into the frame driver by reference.

use glam::{Mat4, Vec2, Vec3};
use crate::error::{Error, Result};
use super::frustum::Frustum;

/// Relative movement directions for [`Camera::translate_along`] and
/// [`FpsCamera::move_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Default yaw in degrees. Looks down -Z, and sits inside [0, 360] so the
/// first `update_front` does not trip the wrap.
pub const DEFAULT_YAW: f32 = 270.0;

/// Pitch limit in degrees applied by mouse look.
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    frustum: Frustum,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera at the origin looking down -Z with +Y up.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            frustum: Frustum::new(),
        }
    }

    /// Recompute `target` from yaw and pitch.
    ///
    /// Yaw outside [0, 360] is snapped, not wrapped: above 360 becomes 0,
    /// below 0 becomes 360.
    pub fn update_front(&mut self) {
        if self.yaw > 360.0 {
            self.yaw = 0.0;
        }
        if self.yaw < 0.0 {
            self.yaw = 360.0;
        }

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.target = front.normalize();
    }

    /// Rebuild the frustum planes from the current pose.
    ///
    /// The frustum intrinsics must have been set beforehand
    /// (see `Renderer::update_view`).
    pub fn rebuild_frustum(&mut self) -> Result<()> {
        let look_at = self.look_at_point();
        self.frustum.set_cam_def(self.position, look_at, self.up)
    }

    /// Move along the view direction (Forward/Backward) or the strafe axis
    /// `normalize(cross(target, up))` (Left/Right). No clamping.
    pub fn translate_along(&mut self, direction: CameraDirection, speed: f32) -> Result<()> {
        match direction {
            CameraDirection::Forward => self.position += self.target * speed,
            CameraDirection::Backward => self.position -= self.target * speed,
            CameraDirection::Left => self.position -= self.strafe_axis()? * speed,
            CameraDirection::Right => self.position += self.strafe_axis()? * speed,
        }
        Ok(())
    }

    fn strafe_axis(&self) -> Result<Vec3> {
        self.target.cross(self.up).try_normalize().ok_or_else(|| {
            Error::InvalidGeometry(format!(
                "target {:?} is parallel to up {:?}; no strafe axis", self.target, self.up
            ))
        })
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit look direction
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// `position + target`
    pub fn look_at_point(&self) -> Vec3 {
        self.position + self.target
    }

    /// Right-handed view matrix looking at `position + target`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at_point(), self.up)
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }
}

/// First-person camera: a [`Camera`] driven by mouse deltas and WASD-style
/// movement.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    camera: Camera,
    last_mouse: Vec2,
    first_mouse: bool,
    sensitivity: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCamera {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(),
            last_mouse: Vec2::new(400.0, 300.0),
            first_mouse: true,
            sensitivity: 0.1,
        }
    }

    /// Feed an absolute cursor position.
    ///
    /// The first call only latches the position. Later calls turn the delta
    /// into yaw/pitch (screen Y grows downwards, so it is inverted) and clamp
    /// pitch to ±89°. `target` is left untouched until the next
    /// [`Camera::update_front`].
    pub fn on_mouse_movement(&mut self, x: f32, y: f32) {
        if self.first_mouse {
            self.last_mouse = Vec2::new(x, y);
            self.first_mouse = false;
        }

        let x_offset = (x - self.last_mouse.x) * self.sensitivity;
        let y_offset = (self.last_mouse.y - y) * self.sensitivity;
        self.last_mouse = Vec2::new(x, y);

        let camera = &mut self.camera;
        camera.yaw += x_offset;
        camera.pitch = (camera.pitch + y_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn move_in(&mut self, direction: CameraDirection, speed: f32) -> Result<()> {
        self.camera.translate_along(direction, speed)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    pub fn last_mouse(&self) -> Vec2 {
        self.last_mouse
    }
}

impl AsRef<Camera> for FpsCamera {
    fn as_ref(&self) -> &Camera {
        &self.camera
    }
}

impl AsMut<Camera> for FpsCamera {
    fn as_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
