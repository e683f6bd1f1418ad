/// Plane - an infinite oriented plane (unit normal + signed offset).
///
/// `distance(p) = dot(normal, p) + d` is a true Euclidean signed distance
/// because the normal is always unit length after construction. Positive
/// values lie on the side the normal points to.

use glam::Vec3;
use crate::error::{Error, Result};

/// Cross products shorter than this are treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    d: f32,
}

impl Default for Plane {
    /// The XZ plane facing +Y.
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            point: Vec3::ZERO,
            d: 0.0,
        }
    }
}

impl Plane {
    /// Build a plane from three points given counter-clockwise as seen from
    /// the half-space the plane bounds.
    pub fn from_three_points(a: Vec3, b: Vec3, c: Vec3) -> Result<Self> {
        let mut plane = Self::default();
        plane.set_three_points(a, b, c)?;
        Ok(plane)
    }

    /// Build a plane through `point` with the given (not necessarily unit) normal.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Result<Self> {
        let mut plane = Self::default();
        plane.set_normal_and_point(normal, point)?;
        Ok(plane)
    }

    /// Build a plane from `ax + by + cz + d = 0`.
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Result<Self> {
        let mut plane = Self::default();
        plane.set_coefficients(a, b, c, d)?;
        Ok(plane)
    }

    /// `normal = normalize(cross(c - b, a - b))`, anchored at `b`.
    ///
    /// Winding is not checked: clockwise input yields a plane facing the
    /// other way.
    pub fn set_three_points(&mut self, a: Vec3, b: Vec3, c: Vec3) -> Result<()> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "non-finite plane points {:?} {:?} {:?}", a, b, c
            )));
        }

        let cross = (c - b).cross(a - b);
        if cross.length_squared() <= DEGENERATE_EPSILON {
            return Err(Error::InvalidGeometry(format!(
                "collinear plane points {:?} {:?} {:?}", a, b, c
            )));
        }

        self.normal = cross.normalize();
        self.point = b;
        self.d = -self.normal.dot(self.point);
        Ok(())
    }

    pub fn set_normal_and_point(&mut self, normal: Vec3, point: Vec3) -> Result<()> {
        if !point.is_finite() {
            return Err(Error::InvalidGeometry(format!("non-finite plane point {:?}", point)));
        }
        let unit = normal.try_normalize().ok_or_else(|| {
            Error::InvalidGeometry(format!("cannot normalize plane normal {:?}", normal))
        })?;

        self.normal = unit;
        self.point = point;
        self.d = -unit.dot(point);
        Ok(())
    }

    /// Normalizes `(a, b, c)` and divides `d` by the same length so that
    /// `distance` stays metric. The anchor point becomes the point of the
    /// plane closest to the origin.
    pub fn set_coefficients(&mut self, a: f32, b: f32, c: f32, d: f32) -> Result<()> {
        let raw = Vec3::new(a, b, c);
        let length = raw.length();
        if !(length.is_finite() && d.is_finite()) || length <= DEGENERATE_EPSILON {
            return Err(Error::InvalidGeometry(format!(
                "invalid plane coefficients ({}, {}, {}, {})", a, b, c, d
            )));
        }

        self.normal = raw / length;
        self.d = d / length;
        self.point = -self.d * self.normal;
        Ok(())
    }

    /// Signed distance from `p` to the plane.
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.d
    }

    /// Unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Anchor point used at construction
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Signed offset, `-dot(normal, point)`
    pub fn d(&self) -> f32 {
        self.d
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
