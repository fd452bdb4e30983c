mod common;

use common::{context, deliver_cube, keyframe, solid};
use glam::{Mat4, Vec3};
use nc_scene::delta::GeomEntry;
use nc_scene::math::AABB;
use nc_scene::Usage;

#[cfg(test)]
mod bounding_box_tests {
    use super::*;

    #[test]
    fn test_union_of_rendered_boxes() {
        let mut nc = context();
        nc.apply_delta(&keyframe(
            1,
            vec![
                solid("F1", Usage::Fixture).with_bbox(AABB::new(Vec3::ZERO, Vec3::ONE)),
                solid("M1", Usage::Machine).with_bbox(AABB::new(Vec3::splat(-2.0), Vec3::ZERO)),
            ],
        ));
        let calculated = nc.calc_bounding_box();
        assert_eq!(calculated, AABB::new(Vec3::splat(-2.0), Vec3::ONE));
        assert_eq!(nc.get_bounding_box(), calculated);
    }

    #[test]
    fn test_polyline_only_scene_is_empty() {
        let mut nc = context();
        nc.apply_delta(&keyframe(
            1,
            vec![GeomEntry::new("T1", Usage::Toolpath)
                .with_polyline("p1.json")
                .with_bbox(AABB::new(Vec3::ZERO, Vec3::ONE))],
        ));
        assert!(nc.calc_bounding_box().is_empty());
        assert!(nc.get_bounding_box().is_empty());
    }

    #[test]
    fn test_detached_nodes_drop_out_of_union() {
        let mut nc = context();
        nc.apply_delta(&keyframe(
            1,
            vec![solid("F1", Usage::Fixture).with_bbox(AABB::new(Vec3::ZERO, Vec3::ONE))],
        ));
        assert!(!nc.get_bounding_box().is_empty());

        nc.apply_delta(&keyframe(2, vec![]));
        assert!(nc.get_bounding_box().is_empty());
    }

    #[test]
    fn test_loaded_geometry_replaces_descriptor_box() {
        let mut nc = context();
        let entry = solid("F1", Usage::Fixture)
            .with_xform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .with_bbox(AABB::new(Vec3::ZERO, Vec3::splat(100.0)));
        nc.apply_delta(&keyframe(1, vec![entry]));
        deliver_cube(&mut nc, "F1");

        let bounds = nc.calc_bounding_box();
        assert_eq!(bounds.min, Vec3::new(9.5, -0.5, -0.5));
        assert_eq!(bounds.max, Vec3::new(10.5, 0.5, 0.5));
    }

    #[test]
    fn test_selected_context_shows_overlay_after_calc() {
        let mut nc = context();
        nc.apply_delta(&keyframe(
            1,
            vec![solid("F1", Usage::Fixture).with_bbox(AABB::new(Vec3::ZERO, Vec3::ONE))],
        ));
        nc.toggle_selection();
        nc.calc_bounding_box();
        let overlay = nc.bounding_box_overlay().expect("Overlay should be shown");
        assert_eq!(overlay.bounds, AABB::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(overlay.edges.len(), 12);
    }
}
