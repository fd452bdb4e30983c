use glam::{Mat4, Vec3};
use nc_scene::math::AABB;

#[cfg(test)]
mod aabb_tests {
    use super::*;

    #[test]
    fn test_aabb_union_creates_bounding_box() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        let aabb2 = AABB::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(15.0, 15.0, 15.0));

        let union = aabb1.union(&aabb2);

        assert_eq!(union.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(15.0, 15.0, 15.0));
    }

    #[test]
    fn test_aabb_union_with_contained_box() {
        let outer = AABB::new(Vec3::ZERO, Vec3::splat(10.0));
        let inner = AABB::new(Vec3::splat(2.0), Vec3::splat(8.0));

        let union = outer.union(&inner);

        assert_eq!(union, outer, "Union should equal larger box");
    }

    #[test]
    fn test_empty_is_union_identity() {
        let aabb = AABB::new(Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(AABB::EMPTY.union(&aabb), aabb);
        assert_eq!(aabb.union(&AABB::EMPTY), aabb);
        assert!(AABB::EMPTY.is_empty());
        assert!(AABB::default().is_empty());
    }

    #[test]
    fn test_empty_box_has_no_size() {
        assert_eq!(AABB::EMPTY.size(), Vec3::ZERO);
        assert_eq!(AABB::EMPTY.surface_area(), 0.0);
    }

    #[test]
    fn test_aabb_center_with_negative_coords() {
        let aabb = AABB::new(Vec3::new(-10.0, -20.0, -30.0), Vec3::new(-2.0, -4.0, -6.0));
        assert_eq!(aabb.center(), Vec3::new(-6.0, -12.0, -18.0));
    }

    #[test]
    fn test_aabb_surface_area_rectangular_box() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
        // 2 * (2*3 + 3*4 + 4*2) = 52
        assert_eq!(aabb.surface_area(), 52.0);
    }

    #[test]
    fn test_degenerate_flat_box_is_not_empty() {
        let flat = AABB::new(Vec3::ZERO, Vec3::new(5.0, 5.0, 0.0));
        assert!(!flat.is_empty());
        assert_eq!(flat.surface_area(), 50.0);
    }

    #[test]
    fn test_from_slice_requires_six_values() {
        let aabb = AABB::from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(aabb.min, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 4.0, 5.0));
        assert!(AABB::from_slice(&[0.0, 1.0, 2.0]).is_none());
        assert!(AABB::from_slice(&[0.0; 7]).is_none());
    }

    #[test]
    fn test_transformed_box_encloses_rotated_corners() {
        let aabb = AABB::new(Vec3::splat(-1.0), Vec3::ONE);
        let rotated = aabb.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4));
        let half_diag = 2.0_f32.sqrt();
        assert!((rotated.max.x - half_diag).abs() < 1e-5);
        assert!((rotated.min.y + half_diag).abs() < 1e-5);
        assert!((rotated.max.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transforming_empty_stays_empty() {
        let moved = AABB::EMPTY.transformed(&Mat4::from_translation(Vec3::X));
        assert!(moved.is_empty());
    }
}
