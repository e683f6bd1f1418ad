/// Frustum - six clipping planes bounding a camera's view volume.
///
/// Built from camera extrinsics (eye, look-at point, up) and intrinsics
/// (vertical FOV, aspect, near, far) by corner construction: the eight
/// corners of the near and far rectangles are computed and each plane is
/// taken from three of them. Every plane normal points into the frustum, so
/// a point is inside when its signed distance to all six planes is >= 0.
///
/// Lifecycle: `Uninitialized → Configured (set_cam_internals) → Defined
/// (set_cam_def)`. Containment queries are rejected until `Defined`.

use glam::Vec3;
use crate::error::{Error, Result};
use super::plane::Plane;

/// Result of a frustum containment test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Entirely outside at least one plane
    Outside,
    /// Straddles at least one plane, outside none
    Intersect,
    /// Entirely inside all planes
    Inside,
}

/// Construction progress of a frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumState {
    /// No intrinsics yet
    Uninitialized,
    /// Intrinsics set, planes not (or no longer) valid
    Configured,
    /// Planes built, containment queries allowed
    Defined,
}

/// Frustum plane indices
pub const PLANE_TOP: usize = 0;
pub const PLANE_BOTTOM: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Frustum corner indices (near/far, top/bottom, left/right)
pub const CORNER_NTL: usize = 0;
pub const CORNER_NTR: usize = 1;
pub const CORNER_NBL: usize = 2;
pub const CORNER_NBR: usize = 3;
pub const CORNER_FTL: usize = 4;
pub const CORNER_FTR: usize = 5;
pub const CORNER_FBL: usize = 6;
pub const CORNER_FBR: usize = 7;

/// Corner triples for each plane, counter-clockwise as seen from inside the
/// frustum. Indexed by plane index. Reordering any triple flips that plane's
/// normal and silently inverts culling for it.
pub const FRUSTUM_PLANE_CORNERS: [[usize; 3]; 6] = [
    [CORNER_NTR, CORNER_NTL, CORNER_FTL], // TOP
    [CORNER_NBL, CORNER_NBR, CORNER_FBR], // BOTTOM
    [CORNER_NTL, CORNER_NBL, CORNER_FBL], // LEFT
    [CORNER_NBR, CORNER_NTR, CORNER_FBR], // RIGHT
    [CORNER_NTL, CORNER_NTR, CORNER_NBR], // NEAR
    [CORNER_FTR, CORNER_FTL, CORNER_FBL], // FAR
];

/// View frustum with cached intrinsics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
    corners: [Vec3; 8],
    state: FrustumState,

    near_dist: f32,
    far_dist: f32,
    aspect_ratio: f32,
    vertical_fov_deg: f32,
    tan_half_fov: f32,
    near_half_height: f32,
    near_half_width: f32,
    far_half_height: f32,
    far_half_width: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

impl Frustum {
    /// Create an uninitialized frustum.
    pub fn new() -> Self {
        Self {
            planes: [Plane::default(); 6],
            corners: [Vec3::ZERO; 8],
            state: FrustumState::Uninitialized,
            near_dist: 0.0,
            far_dist: 0.0,
            aspect_ratio: 0.0,
            vertical_fov_deg: 0.0,
            tan_half_fov: 0.0,
            near_half_height: 0.0,
            near_half_width: 0.0,
            far_half_height: 0.0,
            far_half_width: 0.0,
        }
    }

    /// Store projection intrinsics and precompute the near/far rectangle
    /// half extents.
    ///
    /// Must be called again whenever FOV, aspect, near or far change (e.g. on
    /// resize). Doing so invalidates the planes until the next `set_cam_def`.
    pub fn set_cam_internals(
        &mut self,
        vertical_fov_deg: f32,
        aspect_ratio: f32,
        near_dist: f32,
        far_dist: f32,
    ) -> Result<()> {
        if !(vertical_fov_deg > 0.0 && vertical_fov_deg < 180.0) {
            return Err(Error::InvalidGeometry(format!(
                "vertical fov must be in (0, 180) degrees, got {}", vertical_fov_deg
            )));
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "aspect ratio must be positive, got {}", aspect_ratio
            )));
        }
        if !(near_dist > 0.0 && far_dist > near_dist && far_dist.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "clip distances must satisfy 0 < near < far, got near={} far={}",
                near_dist, far_dist
            )));
        }

        self.vertical_fov_deg = vertical_fov_deg;
        self.aspect_ratio = aspect_ratio;
        self.near_dist = near_dist;
        self.far_dist = far_dist;

        self.tan_half_fov = (vertical_fov_deg.to_radians() * 0.5).tan();
        self.near_half_height = near_dist * self.tan_half_fov;
        self.near_half_width = self.near_half_height * aspect_ratio;
        self.far_half_height = far_dist * self.tan_half_fov;
        self.far_half_width = self.far_half_height * aspect_ratio;

        self.state = FrustumState::Configured;
        Ok(())
    }

    /// Rebuild all six planes from the camera's eye, look-at point and up
    /// vector.
    ///
    /// `look_at` is a point, not a direction. The planes are committed only if
    /// all six are non-degenerate.
    pub fn set_cam_def(&mut self, eye: Vec3, look_at: Vec3, up: Vec3) -> Result<()> {
        if self.state == FrustumState::Uninitialized {
            return Err(Error::InvalidState(
                "set_cam_internals must be called before set_cam_def".to_string(),
            ));
        }

        // Camera basis; Z points backwards, away from the look direction
        let z = (eye - look_at).try_normalize().ok_or_else(|| {
            Error::InvalidGeometry(format!("eye {:?} coincides with look-at point", eye))
        })?;
        let x = up.cross(z).try_normalize().ok_or_else(|| {
            Error::InvalidGeometry(format!("up {:?} is parallel to the view direction", up))
        })?;
        let y = z.cross(x);

        let near_center = eye - z * self.near_dist;
        let far_center = eye - z * self.far_dist;

        let (nh, nw) = (self.near_half_height, self.near_half_width);
        let (fh, fw) = (self.far_half_height, self.far_half_width);

        let mut corners = [Vec3::ZERO; 8];
        corners[CORNER_NTL] = near_center + y * nh - x * nw;
        corners[CORNER_NTR] = near_center + y * nh + x * nw;
        corners[CORNER_NBL] = near_center - y * nh - x * nw;
        corners[CORNER_NBR] = near_center - y * nh + x * nw;
        corners[CORNER_FTL] = far_center + y * fh - x * fw;
        corners[CORNER_FTR] = far_center + y * fh + x * fw;
        corners[CORNER_FBL] = far_center - y * fh - x * fw;
        corners[CORNER_FBR] = far_center - y * fh + x * fw;

        let mut planes = [Plane::default(); 6];
        for (plane, [a, b, c]) in planes.iter_mut().zip(FRUSTUM_PLANE_CORNERS) {
            plane.set_three_points(corners[a], corners[b], corners[c])?;
        }

        self.planes = planes;
        self.corners = corners;
        self.state = FrustumState::Defined;
        Ok(())
    }

    /// Classify a point. Never returns `Intersect`.
    ///
    /// Non-finite coordinates are rejected with `InvalidGeometry`.
    pub fn point_in_frustum(&self, p: Vec3) -> Result<Containment> {
        self.ensure_defined()?;
        if !p.is_finite() {
            return Err(Error::InvalidGeometry(format!("point {:?} is not finite", p)));
        }

        if self.planes.iter().any(|plane| plane.distance(p) < 0.0) {
            return Ok(Containment::Outside);
        }
        Ok(Containment::Inside)
    }

    /// Classify a bounding sphere.
    ///
    /// Outside as soon as the sphere lies wholly behind one plane; Intersect
    /// if it straddles any plane (later planes may still turn it Outside);
    /// Inside only if every plane has `distance >= radius`.
    ///
    /// A non-finite center, or a radius that is negative or not finite, is
    /// rejected with `InvalidGeometry`.
    pub fn sphere_in_frustum(&self, center: Vec3, radius: f32) -> Result<Containment> {
        self.ensure_defined()?;
        if !center.is_finite() {
            return Err(Error::InvalidGeometry(format!("sphere center {:?} is not finite", center)));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "sphere radius must be finite and non-negative, got {}", radius
            )));
        }

        let mut result = Containment::Inside;
        for plane in &self.planes {
            let distance = plane.distance(center);
            if distance < -radius {
                return Ok(Containment::Outside);
            } else if distance < radius {
                result = Containment::Intersect;
            }
        }
        Ok(result)
    }

    fn ensure_defined(&self) -> Result<()> {
        match self.state {
            FrustumState::Defined => Ok(()),
            state => Err(Error::InvalidState(format!(
                "frustum queried in {:?} state; call set_cam_def first", state
            ))),
        }
    }

    // ===== GETTERS =====

    pub fn state(&self) -> FrustumState {
        self.state
    }

    /// Planes indexed by `PLANE_TOP` .. `PLANE_FAR`
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn plane(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    /// Corners indexed by `CORNER_NTL` .. `CORNER_FBR`
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    pub fn near_dist(&self) -> f32 {
        self.near_dist
    }

    pub fn far_dist(&self) -> f32 {
        self.far_dist
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn vertical_fov_deg(&self) -> f32 {
        self.vertical_fov_deg
    }

    pub fn tan_half_fov(&self) -> f32 {
        self.tan_half_fov
    }

    pub fn near_half_height(&self) -> f32 {
        self.near_half_height
    }

    pub fn near_half_width(&self) -> f32 {
        self.near_half_width
    }

    pub fn far_half_height(&self) -> f32 {
        self.far_half_height
    }

    pub fn far_half_width(&self) -> f32 {
        self.far_half_width
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
