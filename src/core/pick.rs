use glam::Mat4;

use crate::core::registry::{EntityRegistry, LeafGeometry, NodeIndex, Root};
use crate::math::{closest_triangle_hit, intersect_aabb, Ray};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Owning node of the leaf that was hit
    pub node: NodeIndex,
    /// World distance along the ray
    pub distance: f32,
}

fn matrix_is_finite(mat: &Mat4) -> bool {
    mat.to_cols_array().iter().all(|v| v.is_finite())
}

/// Nearest visible shell hit among nodes attached to the primary root.
/// Ties keep the first hit found.
pub fn pick(registry: &EntityRegistry, ray: &Ray) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for &index in registry.group(Root::Primary).members() {
        let Some(node) = registry.node(index) else {
            continue;
        };
        if !node.visible {
            continue;
        }

        let world = node.local_to_scene();
        let inv = world.inverse();
        if !matrix_is_finite(&inv) {
            continue;
        }
        let local_ray = ray.transformed(&inv);

        for leaf in node.object.iter().filter(|leaf| leaf.visible) {
            let LeafGeometry::Mesh(mesh) = &leaf.geometry else {
                continue;
            };

            // Box entry is never farther than the surface behind it
            let bounds = mesh.bounds().transformed(&world);
            let t_box = intersect_aabb(ray.origin, ray.direction, bounds.min, bounds.max);
            if t_box < 0.0 || best.is_some_and(|b| t_box >= b.distance) {
                continue;
            }

            let Some((_, hit)) = closest_triangle_hit(
                local_ray.origin,
                local_ray.direction,
                &mesh.vertices,
                &mesh.triangles,
            ) else {
                continue;
            };

            let hit_world = world.transform_point3(local_ray.at(hit.t));
            let distance = (hit_world - ray.origin).length();
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PickHit {
                    node: leaf.owner,
                    distance,
                });
            }
        }
    }

    best
}
