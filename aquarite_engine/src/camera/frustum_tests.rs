use glam::Vec3;
use crate::error::Error;
use super::*;

/// 60° vertical FOV, square aspect, near 1, far 100, at the origin looking down -Z.
fn create_test_frustum() -> Frustum {
    let mut frustum = Frustum::new();
    frustum.set_cam_internals(60.0, 1.0, 1.0, 100.0).unwrap();
    frustum
        .set_cam_def(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), Vec3::Y)
        .unwrap();
    frustum
}

fn min_plane_distance(frustum: &Frustum, p: Vec3) -> f32 {
    frustum
        .planes()
        .iter()
        .map(|plane| plane.distance(p))
        .fold(f32::INFINITY, f32::min)
}

// ============================================================================
// set_cam_internals
// ============================================================================

#[test]
fn test_cam_internals_cached_values() {
    let mut frustum = Frustum::new();
    frustum.set_cam_internals(60.0, 2.0, 1.0, 100.0).unwrap();

    let tang = (30.0f32).to_radians().tan();
    assert!((frustum.tan_half_fov() - tang).abs() < 1e-6);
    assert!((frustum.near_half_height() - tang).abs() < 1e-6);
    assert!((frustum.near_half_width() - tang * 2.0).abs() < 1e-6);
    assert!((frustum.far_half_height() - 100.0 * tang).abs() < 1e-4);
    assert!((frustum.far_half_width() - 200.0 * tang).abs() < 1e-4);
    assert_eq!(frustum.near_dist(), 1.0);
    assert_eq!(frustum.far_dist(), 100.0);
    assert_eq!(frustum.aspect_ratio(), 2.0);
    assert_eq!(frustum.vertical_fov_deg(), 60.0);
    assert_eq!(frustum.state(), FrustumState::Configured);
}

#[test]
fn test_cam_internals_rejects_bad_input() {
    let mut frustum = Frustum::new();
    assert!(matches!(frustum.set_cam_internals(0.0, 1.0, 1.0, 10.0), Err(Error::InvalidGeometry(_))));
    assert!(frustum.set_cam_internals(180.0, 1.0, 1.0, 10.0).is_err());
    assert!(frustum.set_cam_internals(60.0, 0.0, 1.0, 10.0).is_err());
    assert!(frustum.set_cam_internals(60.0, 1.0, 0.0, 10.0).is_err());
    assert!(frustum.set_cam_internals(60.0, 1.0, 10.0, 10.0).is_err());
    assert!(frustum.set_cam_internals(f32::NAN, 1.0, 1.0, 10.0).is_err());
    assert_eq!(frustum.state(), FrustumState::Uninitialized);
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn test_query_before_definition_is_rejected() {
    let frustum = Frustum::new();
    assert!(matches!(frustum.point_in_frustum(Vec3::ZERO), Err(Error::InvalidState(_))));
    assert!(matches!(frustum.sphere_in_frustum(Vec3::ZERO, 1.0), Err(Error::InvalidState(_))));
}

#[test]
fn test_cam_def_requires_internals() {
    let mut frustum = Frustum::new();
    let result = frustum.set_cam_def(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
    assert!(matches!(result, Err(Error::InvalidState(_))));
}

#[test]
fn test_resize_invalidates_planes_until_redefined() {
    let mut frustum = create_test_frustum();
    assert_eq!(frustum.state(), FrustumState::Defined);

    frustum.set_cam_internals(60.0, 16.0 / 9.0, 1.0, 100.0).unwrap();
    assert_eq!(frustum.state(), FrustumState::Configured);
    assert!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, -50.0)).is_err());

    frustum.set_cam_def(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), Vec3::Y).unwrap();
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, -50.0)).unwrap(), Containment::Inside);
}

#[test]
fn test_degenerate_camera_definition_rejected() {
    let mut frustum = Frustum::new();
    frustum.set_cam_internals(60.0, 1.0, 1.0, 100.0).unwrap();

    // eye == look-at
    assert!(matches!(
        frustum.set_cam_def(Vec3::ONE, Vec3::ONE, Vec3::Y),
        Err(Error::InvalidGeometry(_))
    ));
    // up parallel to view direction
    assert!(matches!(
        frustum.set_cam_def(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::Y),
        Err(Error::InvalidGeometry(_))
    ));
    assert_eq!(frustum.state(), FrustumState::Configured);
}

// ============================================================================
// Planes
// ============================================================================

#[test]
fn test_plane_normals_are_unit_and_face_inward() {
    let frustum = create_test_frustum();
    let center = Vec3::new(0.0, 0.0, -50.5);

    for (index, plane) in frustum.planes().iter().enumerate() {
        assert!((plane.normal().length() - 1.0).abs() < 1e-5, "plane {} not unit", index);
        assert!(plane.distance(center) > 0.0, "plane {} faces outward", index);
    }
}

#[test]
fn test_plane_orientation_per_side() {
    let frustum = create_test_frustum();

    assert!(frustum.plane(PLANE_TOP).unwrap().normal().y < 0.0);
    assert!(frustum.plane(PLANE_BOTTOM).unwrap().normal().y > 0.0);
    assert!(frustum.plane(PLANE_LEFT).unwrap().normal().x > 0.0);
    assert!(frustum.plane(PLANE_RIGHT).unwrap().normal().x < 0.0);
    assert!((frustum.plane(PLANE_NEAR).unwrap().normal() - Vec3::NEG_Z).length() < 1e-5);
    assert!((frustum.plane(PLANE_FAR).unwrap().normal() - Vec3::Z).length() < 1e-5);
    assert!(frustum.plane(6).is_none());
}

#[test]
fn test_corners_lie_on_near_and_far_rectangles() {
    let frustum = create_test_frustum();
    let corners = frustum.corners();
    let nh = frustum.near_half_height();
    let fh = frustum.far_half_height();

    assert!((corners[CORNER_NTL] - Vec3::new(-nh, nh, -1.0)).length() < 1e-5);
    assert!((corners[CORNER_NBR] - Vec3::new(nh, -nh, -1.0)).length() < 1e-5);
    assert!((corners[CORNER_FTR] - Vec3::new(fh, fh, -100.0)).length() < 1e-3);
    assert!((corners[CORNER_FBL] - Vec3::new(-fh, -fh, -100.0)).length() < 1e-3);
}

#[test]
fn test_set_cam_def_is_idempotent() {
    let mut frustum = create_test_frustum();
    let first = *frustum.planes();

    frustum.set_cam_def(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), Vec3::Y).unwrap();
    let second = *frustum.planes();

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.normal().to_array().map(f32::to_bits), b.normal().to_array().map(f32::to_bits));
        assert_eq!(a.d().to_bits(), b.d().to_bits());
    }
}

#[test]
fn test_plane_corner_table() {
    assert_eq!(FRUSTUM_PLANE_CORNERS[PLANE_TOP], [CORNER_NTR, CORNER_NTL, CORNER_FTL]);
    assert_eq!(FRUSTUM_PLANE_CORNERS[PLANE_BOTTOM], [CORNER_NBL, CORNER_NBR, CORNER_FBR]);
    assert_eq!(FRUSTUM_PLANE_CORNERS[PLANE_LEFT], [CORNER_NTL, CORNER_NBL, CORNER_FBL]);
    assert_eq!(FRUSTUM_PLANE_CORNERS[PLANE_RIGHT], [CORNER_NBR, CORNER_NTR, CORNER_FBR]);
    assert_eq!(FRUSTUM_PLANE_CORNERS[PLANE_NEAR], [CORNER_NTL, CORNER_NTR, CORNER_NBR]);
    assert_eq!(FRUSTUM_PLANE_CORNERS[PLANE_FAR], [CORNER_FTR, CORNER_FTL, CORNER_FBL]);
}

#[test]
fn test_plane_constants() {
    assert_eq!(PLANE_TOP, 0);
    assert_eq!(PLANE_BOTTOM, 1);
    assert_eq!(PLANE_LEFT, 2);
    assert_eq!(PLANE_RIGHT, 3);
    assert_eq!(PLANE_NEAR, 4);
    assert_eq!(PLANE_FAR, 5);
}

// ============================================================================
// point_in_frustum
// ============================================================================

#[test]
fn test_point_in_front_is_inside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, -50.0)).unwrap(), Containment::Inside);
}

#[test]
fn test_point_behind_eye_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, 50.0)).unwrap(), Containment::Outside);
}

#[test]
fn test_point_beyond_far_plane_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, -101.0)).unwrap(), Containment::Outside);
}

#[test]
fn test_point_before_near_plane_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, -0.5)).unwrap(), Containment::Outside);
}

#[test]
fn test_point_outside_side_planes() {
    let frustum = create_test_frustum();
    // half extent at depth 10 is 10 * tan(30°) ≈ 5.77
    assert_eq!(frustum.point_in_frustum(Vec3::new(5.0, 0.0, -10.0)).unwrap(), Containment::Inside);
    assert_eq!(frustum.point_in_frustum(Vec3::new(7.0, 0.0, -10.0)).unwrap(), Containment::Outside);
    assert_eq!(frustum.point_in_frustum(Vec3::new(-7.0, 0.0, -10.0)).unwrap(), Containment::Outside);
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 7.0, -10.0)).unwrap(), Containment::Outside);
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, -7.0, -10.0)).unwrap(), Containment::Outside);
}

#[test]
fn test_translated_and_rotated_camera() {
    let mut frustum = Frustum::new();
    frustum.set_cam_internals(60.0, 1.0, 1.0, 100.0).unwrap();
    let eye = Vec3::new(10.0, 5.0, 0.0);
    frustum.set_cam_def(eye, eye + Vec3::X, Vec3::Y).unwrap();

    assert_eq!(frustum.point_in_frustum(eye + Vec3::new(50.0, 0.0, 0.0)).unwrap(), Containment::Inside);
    assert_eq!(frustum.point_in_frustum(eye - Vec3::new(50.0, 0.0, 0.0)).unwrap(), Containment::Outside);
    assert_eq!(frustum.point_in_frustum(Vec3::new(0.0, 0.0, -50.0)).unwrap(), Containment::Outside);
}

// ============================================================================
// sphere_in_frustum
// ============================================================================

#[test]
fn test_sphere_far_plane_boundary() {
    let frustum = create_test_frustum();
    let center = Vec3::new(0.0, 0.0, -110.0);
    let d = frustum.plane(PLANE_FAR).unwrap().distance(center);
    assert!((d + 10.0).abs() < 1e-3);

    // Wholly behind the far plane
    assert_eq!(frustum.sphere_in_frustum(center, -d * 0.99).unwrap(), Containment::Outside);
    // Exactly touching: d == -r is not "behind", so it straddles
    assert_eq!(frustum.sphere_in_frustum(center, -d).unwrap(), Containment::Intersect);
    assert_eq!(frustum.sphere_in_frustum(center, -d * 1.5).unwrap(), Containment::Intersect);
}

#[test]
fn test_sphere_inside_boundary() {
    let frustum = create_test_frustum();
    let center = Vec3::new(0.0, 0.0, -20.0);
    let nearest = min_plane_distance(&frustum, center);
    assert!(nearest > 0.0);

    // d >= r on every plane
    assert_eq!(frustum.sphere_in_frustum(center, nearest).unwrap(), Containment::Inside);
    assert_eq!(frustum.sphere_in_frustum(center, nearest * 0.5).unwrap(), Containment::Inside);
    // d < r on the nearest plane
    assert_eq!(frustum.sphere_in_frustum(center, nearest * 1.01).unwrap(), Containment::Intersect);
}

#[test]
fn test_sphere_classification_monotonic_in_radius() {
    let frustum = create_test_frustum();
    let center = Vec3::new(0.0, 0.0, 20.0); // behind the eye

    let mut previous = Containment::Outside;
    for step in 0..200 {
        let radius = step as f32 * 0.5;
        let result = frustum.sphere_in_frustum(center, radius).unwrap();
        // Once no longer outside, a growing sphere never becomes outside again
        if previous != Containment::Outside {
            assert_ne!(result, Containment::Outside, "radius {}", radius);
        }
        previous = result;
    }
    assert_eq!(frustum.sphere_in_frustum(center, 0.0).unwrap(), Containment::Outside);
    assert_eq!(previous, Containment::Intersect);
}

#[test]
fn test_outside_on_later_plane_wins_over_intersect() {
    let frustum = create_test_frustum();
    // Straddles TOP, BOTTOM, LEFT and RIGHT (they meet at the eye) but lies
    // wholly behind NEAR, which is tested after them.
    let center = Vec3::new(0.0, 0.0, 0.5);
    let radius = 0.3;
    for index in [PLANE_TOP, PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT] {
        let d = frustum.plane(index).unwrap().distance(center);
        assert!(d > -radius && d < radius, "plane {} distance {}", index, d);
    }
    assert!(frustum.plane(PLANE_NEAR).unwrap().distance(center) < -radius);
    assert_eq!(frustum.sphere_in_frustum(center, radius).unwrap(), Containment::Outside);
}

#[test]
fn test_zero_radius_sphere_matches_point_test() {
    let frustum = create_test_frustum();
    for p in [
        Vec3::new(0.0, 0.0, -50.0),
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::new(30.0, 0.0, -40.0),
        Vec3::new(1.0, -1.0, -3.0),
    ] {
        let point = frustum.point_in_frustum(p).unwrap();
        let sphere = frustum.sphere_in_frustum(p, 0.0).unwrap();
        assert_eq!(point == Containment::Outside, sphere == Containment::Outside);
    }
}

// ============================================================================
// NON-FINITE INPUT TESTS
// ============================================================================

#[test]
fn test_non_finite_point_is_rejected() {
    let frustum = create_test_frustum();
    for p in [
        Vec3::new(f32::NAN, 0.0, -10.0),
        Vec3::new(0.0, f32::INFINITY, -10.0),
        Vec3::new(0.0, 0.0, f32::NEG_INFINITY),
    ] {
        assert!(
            matches!(frustum.point_in_frustum(p), Err(Error::InvalidGeometry(_))),
            "point {:?}", p
        );
    }
}

#[test]
fn test_non_finite_sphere_center_is_rejected() {
    let frustum = create_test_frustum();
    let center = Vec3::new(f32::NAN, 0.0, -10.0);
    assert!(matches!(frustum.sphere_in_frustum(center, 1.0), Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_nan_radius_is_rejected() {
    let frustum = create_test_frustum();
    // Behind the eye; a NaN radius must not turn this into Inside
    let center = Vec3::new(0.0, 0.0, 50.0);
    assert!(matches!(frustum.sphere_in_frustum(center, f32::NAN), Err(Error::InvalidGeometry(_))));
    assert_eq!(frustum.sphere_in_frustum(center, 1.0).unwrap(), Containment::Outside);
}

#[test]
fn test_infinite_or_negative_radius_is_rejected() {
    let frustum = create_test_frustum();
    let center = Vec3::new(0.0, 0.0, -10.0);
    for radius in [f32::INFINITY, -0.5, -f32::INFINITY] {
        assert!(
            matches!(frustum.sphere_in_frustum(center, radius), Err(Error::InvalidGeometry(_))),
            "radius {}", radius
        );
    }
}
