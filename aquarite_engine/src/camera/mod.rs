//! Camera module - planes, frustum, cameras and mouse picking.
//!
//! Cameras are tools provided by the engine, owned and driven by the caller.
//! The engine never stores them.

mod camera;
mod frustum;
mod picking;
mod plane;

pub use camera::{Camera, CameraDirection, FpsCamera, DEFAULT_YAW, PITCH_LIMIT};
pub use frustum::{
    Containment, Frustum, FrustumState, FRUSTUM_PLANE_CORNERS,
    PLANE_TOP, PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT, PLANE_NEAR, PLANE_FAR,
    CORNER_NTL, CORNER_NTR, CORNER_NBL, CORNER_NBR,
    CORNER_FTL, CORNER_FTR, CORNER_FBL, CORNER_FBR,
};
pub use picking::MousePicker;
pub use plane::Plane;
