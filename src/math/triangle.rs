use glam::Vec3;

/// Result of triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32,       // Distance along ray
    pub u: f32,       // Barycentric coordinate u
    pub v: f32,       // Barycentric coordinate v
    pub normal: Vec3, // Surface normal at intersection
}

/// Möller-Trumbore ray-triangle intersection algorithm
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Behind origin
    if t < EPSILON {
        return None;
    }

    let normal = edge1.cross(edge2).normalize();

    Some(TriangleIntersection { t, u, v, normal })
}

/// Closest hit over an indexed triangle list, returning triangle index and hit
pub fn closest_triangle_hit(
    ray_origin: Vec3,
    ray_dir: Vec3,
    vertices: &[Vec3],
    indices: &[[u32; 3]],
) -> Option<(usize, TriangleIntersection)> {
    let mut closest: Option<(usize, TriangleIntersection)> = None;

    for (idx, tri) in indices.iter().enumerate() {
        let (Some(&v0), Some(&v1), Some(&v2)) = (
            vertices.get(tri[0] as usize),
            vertices.get(tri[1] as usize),
            vertices.get(tri[2] as usize),
        ) else {
            continue;
        };
        if let Some(hit) = moller_trumbore_intersect(ray_origin, ray_dir, v0, v1, v2) {
            if closest.map_or(true, |(_, best)| hit.t < best.t) {
                closest = Some((idx, hit));
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_triangle() -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(-1.0, 0.0, -5.0),
            Vec3::new(1.0, 0.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        )
    }

    #[test]
    fn test_moller_trumbore_hit() {
        let (v0, v1, v2) = create_test_triangle();
        let hit = moller_trumbore_intersect(Vec3::ZERO, Vec3::new(0.0, 0.2, -1.0).normalize(), v0, v1, v2)
            .expect("ray should hit triangle");
        assert!(hit.t > 0.0);
        assert!(hit.u >= 0.0 && hit.v >= 0.0 && hit.u + hit.v <= 1.0);
    }

    #[test]
    fn test_moller_trumbore_miss() {
        let (v0, v1, v2) = create_test_triangle();
        let ray_dir = Vec3::new(5.0, 0.0, -1.0).normalize();
        assert!(moller_trumbore_intersect(Vec3::ZERO, ray_dir, v0, v1, v2).is_none());
    }

    #[test]
    fn test_behind_ray() {
        let (v0, v1, v2) = create_test_triangle();
        let ray_dir = Vec3::new(0.0, 0.0, 1.0);
        assert!(moller_trumbore_intersect(Vec3::ZERO, ray_dir, v0, v1, v2).is_none());
    }

    #[test]
    fn test_closest_triangle_hit_prefers_nearer() {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -10.0),
            Vec3::new(1.0, -1.0, -10.0),
            Vec3::new(0.0, 1.0, -10.0),
            Vec3::new(-1.0, -1.0, -4.0),
            Vec3::new(1.0, -1.0, -4.0),
            Vec3::new(0.0, 1.0, -4.0),
        ];
        let indices = vec![[0, 1, 2], [3, 4, 5]];
        let (idx, hit) = closest_triangle_hit(Vec3::ZERO, Vec3::NEG_Z, &vertices, &indices)
            .expect("both triangles are on the ray");
        assert_eq!(idx, 1);
        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_closest_triangle_hit_skips_bad_indices() {
        let vertices = vec![Vec3::ZERO, Vec3::X];
        let indices = vec![[0, 1, 7]];
        assert!(closest_triangle_hit(Vec3::Z, Vec3::NEG_Z, &vertices, &indices).is_none());
    }
}
