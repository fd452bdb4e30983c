mod common;

use common::{context, deliver_cube, keyframe};
use glam::{Mat4, Vec2, Vec3};
use nc_scene::delta::GeomEntry;
use nc_scene::math::Ray;
use nc_scene::Usage;

#[cfg(test)]
mod pick_tests {
    use super::*;

    /// Slightly off-axis so the ray never runs along a face diagonal
    fn probe() -> Ray {
        Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::new(0.0, 0.0, -1.0))
    }

    fn fixture_at(id: &str, z: f32) -> GeomEntry {
        GeomEntry::new(id, Usage::Fixture)
            .with_shell(id)
            .with_xform(Mat4::from_translation(Vec3::new(0.0, 0.0, z)))
    }

    fn two_boxes() -> nc_scene::NcContext {
        let mut nc = context();
        nc.apply_delta(&keyframe(1, vec![fixture_at("far", -10.0), fixture_at("near", -5.0)]));
        deliver_cube(&mut nc, "far");
        deliver_cube(&mut nc, "near");
        nc
    }

    #[test]
    fn test_pick_returns_nearest_box() {
        let nc = two_boxes();
        let hit = nc.pick(&probe()).expect("Ray should hit a box");
        assert_eq!(hit.id, "near");
    }

    #[test]
    fn test_pick_skips_hidden_nodes() {
        let mut nc = two_boxes();
        nc.node_mut("near").unwrap().set_invisible();
        assert_eq!(nc.pick(&probe()).unwrap().id, "far");

        nc.node_mut("near").unwrap().toggle_visibility();
        assert_eq!(nc.pick(&probe()).unwrap().id, "near");
    }

    #[test]
    fn test_pick_skips_detached_nodes() {
        let mut nc = two_boxes();
        nc.apply_delta(&keyframe(2, vec![fixture_at("far", -10.0)]));
        assert_eq!(nc.pick(&probe()).unwrap().id, "far");
    }

    #[test]
    fn test_pick_without_geometry_misses() {
        let mut nc = context();
        nc.apply_delta(&keyframe(1, vec![fixture_at("pending", -5.0)]));
        assert!(nc.pick(&probe()).is_none());
    }

    #[test]
    fn test_pick_misses_when_pointing_away() {
        let nc = two_boxes();
        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(nc.pick(&ray).is_none());
    }

    #[test]
    fn test_select_from_viewport_centre() {
        let nc = two_boxes();
        // Identity inverse view-projection: NDC maps straight to world, ray along +Z
        let flip = Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0));
        let viewport = Vec2::new(800.0, 600.0);
        let cursor = Vec2::new(440.0, 240.0);
        let hit = nc.select(&flip, cursor, viewport).expect("Centre pick should hit");
        assert_eq!(hit.id, "near");
    }
}
