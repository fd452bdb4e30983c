use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::AABB;

/// Semantic role of a geometry entity in the machining scene
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    Machine,
    Fixture,
    Cutter,
    Asis,
    Tobe,
    Toolpath,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Usage {
    /// Categories hidden and detached when a new working step begins
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Usage::Cutter | Usage::Tobe | Usage::Asis | Usage::Machine | Usage::Fixture
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Usage::Machine => "machine",
            Usage::Fixture => "fixture",
            Usage::Cutter => "cutter",
            Usage::Asis => "asis",
            Usage::Tobe => "tobe",
            Usage::Toolpath => "toolpath",
            Usage::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which geometry payload and completion event a node expects
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomKind {
    Shell,
    Polyline,
}

/// Triangle mesh in model space
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self { vertices, triangles }
    }

    /// Closed box with outward-facing triangles
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let vertices = AABB::new(min, max).corners().to_vec();
        let triangles = vec![
            [0, 2, 1], [0, 3, 2], // -z
            [4, 5, 6], [4, 6, 7], // +z
            [0, 1, 5], [0, 5, 4], // -y
            [3, 7, 6], [3, 6, 2], // +y
            [0, 4, 7], [0, 7, 3], // -x
            [1, 2, 6], [1, 6, 5], // +x
        ];
        Self { vertices, triangles }
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_points(self.vertices.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Connected line strip in model space
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
}

impl Polyline {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_points(self.points.iter().copied())
    }
}

/// Finished geometry payload delivered by the loader
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Shell(Mesh),
    Polyline(Vec<Polyline>),
}

impl Geometry {
    pub fn kind(&self) -> GeomKind {
        match self {
            Geometry::Shell(_) => GeomKind::Shell,
            Geometry::Polyline(_) => GeomKind::Polyline,
        }
    }
}
