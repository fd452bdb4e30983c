use glam::Vec3;

use crate::math::{Tint, AABB, TRACE_TINT};

const DEFAULT_CAPACITY: usize = 1024;

/// Tool-tip path accumulated over the whole job.
/// Storage doubles when full so the line can grow without bound.
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    points: Vec<[f32; 3]>,
    dirty: bool,
    pub tint: Tint,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity.max(1)),
            dirty: false,
            tint: TRACE_TINT,
        }
    }

    pub fn push(&mut self, point: Vec3) {
        if self.points.len() == self.points.capacity() {
            let grow_by = self.points.capacity().max(1);
            self.points.reserve_exact(grow_by);
            log::debug!("trace storage grown to {} points", self.points.capacity());
        }
        self.points.push(point.to_array());
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).map(|p| Vec3::from_array(*p))
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.last().map(|p| Vec3::from_array(*p))
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().map(|p| Vec3::from_array(*p))
    }

    /// Packed xyz positions for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Returns whether points were appended since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_points(self.points())
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
