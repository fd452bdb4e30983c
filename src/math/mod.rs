mod aabb;
mod color;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use color::{Tint, CUTTER_TINT, NEUTRAL_TINT, TRACE_TINT};
pub use ray::{cursor_to_ndc, intersect_aabb, Ray};
pub use triangle::{closest_triangle_hit, moller_trumbore_intersect, TriangleIntersection};
