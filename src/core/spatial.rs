use crate::core::registry::{EntityRegistry, SceneNode};
use crate::math::AABB;
use crate::types::GeomKind;

/// Nodes that contribute volume: rendered, and not a toolpath line
fn contributes(node: &SceneNode) -> bool {
    node.rendered && node.kind != GeomKind::Polyline
}

/// Union of the stored boxes of every contributing node.
/// A node whose box is still unknown adds nothing.
pub fn union_bounds(registry: &EntityRegistry) -> AABB {
    registry
        .iter()
        .filter(|(_, node)| contributes(node))
        .filter_map(|(_, node)| node.bbox)
        .fold(AABB::EMPTY, |acc, b| acc.union(&b))
}

/// Refresh each contributing node's box from its loaded geometry, then union.
/// An empty measurement leaves the node's previous box in place.
pub fn recompute_bounds(registry: &mut EntityRegistry) -> AABB {
    let mut total = AABB::EMPTY;
    for (_, node) in registry.iter_mut() {
        if !contributes(node) {
            continue;
        }
        let measured = node.geometry_bounds();
        if !measured.is_empty() {
            node.bbox = Some(measured);
        }
        if let Some(bbox) = node.bbox {
            total = total.union(&bbox);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::SceneNode;
    use crate::types::{Mesh, Usage};
    use glam::{Mat4, Vec3};

    fn boxed(id: &str, kind: GeomKind, min: Vec3, max: Vec3) -> SceneNode {
        SceneNode::new(id, Usage::Fixture, kind, Mat4::IDENTITY, Some(AABB::new(min, max)))
    }

    #[test]
    fn polyline_only_registry_is_empty() {
        let mut registry = EntityRegistry::new();
        registry.add(boxed("T1", GeomKind::Polyline, Vec3::ZERO, Vec3::ONE));
        assert!(union_bounds(&registry).is_empty());
        assert!(recompute_bounds(&mut registry).is_empty());
    }

    #[test]
    fn skips_unrendered_nodes() {
        let mut registry = EntityRegistry::new();
        registry.add(boxed("A", GeomKind::Shell, Vec3::ZERO, Vec3::ONE));
        let mut far = boxed("B", GeomKind::Shell, Vec3::splat(10.0), Vec3::splat(11.0));
        far.rendered = false;
        registry.add(far);
        let bounds = union_bounds(&registry);
        assert_eq!(bounds.max, Vec3::ONE);
    }

    #[test]
    fn recompute_keeps_previous_box_until_loaded() {
        let mut registry = EntityRegistry::new();
        let index = registry.add(boxed("A", GeomKind::Shell, Vec3::ZERO, Vec3::ONE));
        assert_eq!(recompute_bounds(&mut registry).max, Vec3::ONE);

        registry.attach_mesh(index, Mesh::cuboid(Vec3::splat(-2.0), Vec3::splat(2.0)));
        let bounds = recompute_bounds(&mut registry);
        assert_eq!(bounds.min, Vec3::splat(-2.0));
        assert_eq!(registry.get("A").unwrap().bbox.unwrap().max, Vec3::splat(2.0));
    }
}
