#![allow(dead_code)]

use glam::{Mat4, Vec3};
use nc_scene::delta::{Delta, GeomEntry, Incremental, Keyframe};
use nc_scene::{Geometry, LoadCompletion, Loader, Mesh, NcContext, Usage};

pub fn context() -> NcContext {
    NcContext::new("boxy", None, Loader::default())
}

pub fn keyframe(workingstep: i64, geom: Vec<GeomEntry>) -> Delta {
    Delta::Keyframe(Keyframe {
        workingstep: Some(workingstep),
        geom,
    })
}

pub fn solid(id: &str, usage: Usage) -> GeomEntry {
    GeomEntry::new(id, usage).with_shell(format!("{id}.stl"))
}

pub fn cutter_move(id: &str, position: Vec3) -> Delta {
    Delta::Incremental(Incremental {
        geom: vec![GeomEntry::new(id, Usage::Cutter).with_xform(Mat4::IDENTITY)],
        mtcoords: Some(position),
    })
}

/// Deliver a unit cube shell centred on the node's origin
pub fn deliver_cube(nc: &mut NcContext, id: &str) {
    nc.loader_mut().complete(LoadCompletion {
        key: id.to_string(),
        payload: Geometry::Shell(Mesh::cuboid(Vec3::splat(-0.5), Vec3::splat(0.5))),
    });
    nc.drain_completions();
}
